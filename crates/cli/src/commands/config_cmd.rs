//! `actuator config` — Show the resolved configuration.

use actuator_config::AppConfig;

pub async fn run(default: bool) -> Result<(), Box<dyn std::error::Error>> {
    if default {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Never echo the key itself
    let mut display = config;
    if display.llm.api_key.is_some() {
        display.llm.api_key = Some("[REDACTED]".into());
    }
    let toml_str = toml::to_string_pretty(&display)?;

    println!(
        "# {}",
        AppConfig::config_dir().join("config.toml").display()
    );
    println!();
    print!("{toml_str}");

    Ok(())
}
