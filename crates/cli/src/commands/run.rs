//! `actuator run` — Execute one control-loop run against a task.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actuator_agent::{AgentLoop, RunRecord, RunStatus};
use actuator_config::AppConfig;
use actuator_core::event::EventBus;
use actuator_providers::build_provider;
use actuator_tools::default_registry;

pub async fn run(
    task: String,
    max_iterations: Option<u32>,
    workspace: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for the API key before anything touches the network
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    ACTUATOR_API_KEY   (any backend, highest priority)");
        eprintln!("    OPENAI_API_KEY     (OpenAI backend)");
        eprintln!("    GEMINI_API_KEY     (Gemini backend)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let provider = build_provider(&config.llm)?;
    let workspace = workspace.unwrap_or_else(|| config.agent.workspace_path.clone());
    let tools = Arc::new(default_registry(&workspace));
    let event_bus = Arc::new(EventBus::default());

    let agent = AgentLoop::new(provider, tools, event_bus)
        .with_max_iterations(config.agent.max_iterations)
        .with_tool_timeout(Duration::from_secs(config.agent.tool_timeout_secs));

    println!();
    println!("🤖 Actuator");
    println!("  Provider:   {}", config.llm.provider);
    println!("  Model:      {}", config.llm.model);
    println!("  Workspace:  {}", workspace.display());
    println!("  Task:       {task}");
    println!();

    let result = agent.run(task, max_iterations).await;

    for (index, record) in result.records.iter().enumerate() {
        match record {
            RunRecord::Completed { action, result } if result.success => {
                println!("  [{}] ✅ {}", index + 1, action.name);
            }
            RunRecord::Completed { action, result } => {
                let error = result.error.as_deref().unwrap_or("Unknown error");
                println!("  [{}] ❌ {}: {error}", index + 1, action.name);
            }
            RunRecord::Failure { error, iteration } => {
                println!("  [{}] ❌ iteration {iteration}: {error}", index + 1);
            }
        }
    }
    if !result.records.is_empty() {
        println!();
    }

    let status = match result.status {
        RunStatus::Finished => "finished",
        RunStatus::MaxIterationsReached => "max iterations reached",
        RunStatus::Failed => "failed",
    };
    println!("  Status:     {status} ({} iterations)", result.iterations);
    if let Some(message) = &result.message {
        println!("  Message:    {message}");
    }
    if let Some(final_message) = &result.final_message {
        println!();
        for line in final_message.lines() {
            println!("  Assistant > {line}");
        }
    }
    println!();

    Ok(())
}
