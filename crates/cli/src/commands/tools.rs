//! `actuator tools` — List the built-in capability set.

use actuator_config::AppConfig;
use actuator_tools::default_registry;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let registry = default_registry(&config.agent.workspace_path);

    println!("🔧 Registered tools ({})", registry.len());
    println!();
    for definition in registry.definitions() {
        println!("  {}", definition.name);
        println!("    {}", definition.description);
        println!("    schema: {}", serde_json::to_string(&definition.parameters)?);
        println!();
    }

    Ok(())
}
