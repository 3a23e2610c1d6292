use std::path::Path;

use respite_core::timer::format_countdown;

pub fn run(config: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config)?;
    let registry = config.registry()?;

    if json {
        let presets: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
        return Ok(());
    }

    for preset in registry.iter() {
        let marker = if preset.id == config.default_preset { '*' } else { ' ' };
        println!(
            "{marker} {:>3}  {:<24} work {:>8}  break {:>8}",
            preset.id,
            preset.name,
            format_countdown(preset.work_duration),
            format_countdown(preset.break_duration),
        );
    }
    Ok(())
}
