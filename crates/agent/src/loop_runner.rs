//! The control loop implementation.
//!
//! One `run` drives generate → act → observe iterations: the provider
//! proposes, the generator translates, the executor dispatches, and the
//! outcomes are folded back into the conversation for the next prompt.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actuator_core::action::{Action, ActionResult, ActionType};
use actuator_core::context::{ContextEntry, Conversation};
use actuator_core::event::{AgentEvent, EventBus};
use actuator_core::provider::{GenerationProvider, GenerationRequest, ToolChoice};
use actuator_core::tool::ToolRegistry;
use actuator_mcp::McpClient;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::executor::ActionExecutor;
use crate::generator::ActionGenerator;

/// Trailing context entries rendered into prompts after the first iteration.
const CONTEXT_WINDOW: usize = 5;

/// Result text is clipped to this many characters in iteration summaries.
const SUMMARY_RESULT_CHARS: usize = 200;

const DEFAULT_MAX_ITERATIONS: u32 = 50;
const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// A `Finish` action executed, or the generator yielded no actions.
    Finished,
    /// The iteration cap was hit without a `Finish`.
    MaxIterationsReached,
    /// An error escaped an iteration and stopped the run.
    Failed,
}

/// One entry in a run's accumulated result list, in dispatch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunRecord {
    /// An executed action and its outcome.
    Completed { action: Action, result: ActionResult },
    /// A fail-stop error raised outside the executor boundary.
    Failure { error: String, iteration: u32 },
}

/// The externally observable outcome of one control-loop invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether the run ended under the iteration cap. The `Finish` and
    /// no-actions paths always report `true`.
    pub success: bool,
    pub iterations: u32,
    pub status: RunStatus,
    pub records: Vec<RunRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The raw provider content from the iteration that issued `Finish`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
}

/// The control loop that orchestrates generation and action dispatch.
pub struct AgentLoop {
    provider: Arc<dyn GenerationProvider>,
    tools: Arc<ToolRegistry>,
    executor: ActionExecutor,
    generator: ActionGenerator,
    max_iterations: u32,
    event_bus: Arc<EventBus>,
}

impl AgentLoop {
    /// Create a new control loop with the default iteration cap and tool
    /// timeout.
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        tools: Arc<ToolRegistry>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            executor: ActionExecutor::new(tools.clone()).with_tool_timeout(DEFAULT_TOOL_TIMEOUT),
            generator: ActionGenerator::new(),
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            event_bus,
        }
    }

    /// Set the iteration cap used when `run` is not given one.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Bound each capability invocation to `timeout`.
    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.with_tool_timeout(timeout);
        self
    }

    /// Attach a protocol client for `ProtocolRequest` actions.
    pub fn with_protocol_client(mut self, client: Arc<McpClient>) -> Self {
        self.executor = self.executor.with_protocol_client(client);
        self
    }

    /// Fixed instructions describing the agent and its tools.
    fn system_prompt(&self) -> String {
        let tool_lines = self
            .tools
            .definitions()
            .iter()
            .map(|d| format!("- {}: {}", d.name, d.description))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are a coding agent with access to the following tools:\n\n\
             {tool_lines}\n\n\
             You can:\n\
             1. Read and write files\n\
             2. Search and analyze code\n\
             3. Edit code files\n\
             4. Execute various coding tasks\n\n\
             When given a task:\n\
             1. Break it down into steps\n\
             2. Use the appropriate tools to accomplish each step\n\
             3. Verify your work\n\
             4. Provide clear feedback on what was done\n\n\
             Always be careful with file operations and verify before making destructive changes."
        )
    }

    /// Drive the loop until completion, failure, or the iteration cap.
    ///
    /// `max_iterations` overrides the configured cap for this run only.
    pub async fn run(&self, task: impl Into<String>, max_iterations: Option<u32>) -> RunResult {
        let task = task.into();
        let max_iterations = max_iterations.unwrap_or(self.max_iterations);
        let run_id = Uuid::new_v4().to_string();

        info!(run_id = %run_id, max_iterations, "Starting run");

        let system_prompt = self.system_prompt();
        let definitions = self.tools.definitions();

        let mut conversation = Conversation::new();
        conversation.push(ContextEntry::user(&task));

        let mut records: Vec<RunRecord> = Vec::new();
        let mut iterations: u32 = 0;

        while iterations < max_iterations {
            iterations += 1;
            debug!(run_id = %run_id, iteration = iterations, "Loop iteration");

            // The task drives the first iteration; after that, the
            // rendered trailing window carries what happened so far.
            let prompt = if iterations == 1 {
                task.clone()
            } else {
                conversation.render_window(CONTEXT_WINDOW)
            };

            let request = GenerationRequest {
                prompt,
                system_prompt: Some(system_prompt.clone()),
                tools: definitions.clone(),
                tool_choice: ToolChoice::Auto,
            };

            let response = match self.provider.generate(request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(run_id = %run_id, iteration = iterations, error = %e, "Generation failed, stopping run");
                    self.event_bus.publish(AgentEvent::ErrorOccurred {
                        run_id: run_id.clone(),
                        iteration: iterations,
                        error_message: e.to_string(),
                        timestamp: Utc::now(),
                    });
                    records.push(RunRecord::Failure {
                        error: format!("Error in iteration {iterations}: {e}"),
                        iteration: iterations,
                    });
                    return self.finish_run(
                        run_id,
                        RunStatus::Failed,
                        iterations,
                        max_iterations,
                        records,
                    );
                }
            };

            if let Some(usage) = &response.usage {
                self.event_bus.publish(AgentEvent::GenerationCompleted {
                    run_id: run_id.clone(),
                    model: response.model.clone(),
                    tokens_used: usage.total_tokens,
                    timestamp: Utc::now(),
                });
            }

            conversation.push(ContextEntry::assistant(&response.content));

            let actions = self.generator.generate(&response);
            if actions.is_empty() {
                debug!(run_id = %run_id, iteration = iterations, "No actions generated, treating as completion");
                self.event_bus.publish(AgentEvent::RunCompleted {
                    run_id,
                    success: true,
                    iterations,
                    timestamp: Utc::now(),
                });
                return RunResult {
                    success: true,
                    iterations,
                    status: RunStatus::Finished,
                    records,
                    message: Some("Task completed".to_string()),
                    final_message: None,
                };
            }

            let batch_start = records.len();
            for action in actions {
                let start = Instant::now();
                let result = self.executor.execute(&action).await;
                let duration_ms = start.elapsed().as_millis() as u64;

                self.event_bus.publish(AgentEvent::ActionExecuted {
                    run_id: run_id.clone(),
                    action: action.name.clone(),
                    success: result.success,
                    duration_ms,
                    timestamp: Utc::now(),
                });

                if action.action_type == ActionType::Finish {
                    // Anything after the Finish in this batch never runs,
                    // and the Finish itself leaves no record.
                    info!(run_id = %run_id, iterations, "Finish action executed");
                    self.event_bus.publish(AgentEvent::RunCompleted {
                        run_id,
                        success: true,
                        iterations,
                        timestamp: Utc::now(),
                    });
                    return RunResult {
                        success: true,
                        iterations,
                        status: RunStatus::Finished,
                        records,
                        message: None,
                        final_message: Some(response.content),
                    };
                }

                records.push(RunRecord::Completed { action, result });
            }

            let summary = summarize_records(&records[batch_start..]);
            conversation.push(ContextEntry::user(summary));
        }

        self.finish_run(
            run_id,
            RunStatus::MaxIterationsReached,
            iterations,
            max_iterations,
            records,
        )
    }

    /// Shared loop-exit reporting for the cap and fail-stop paths.
    fn finish_run(
        &self,
        run_id: String,
        status: RunStatus,
        iterations: u32,
        max_iterations: u32,
        records: Vec<RunRecord>,
    ) -> RunResult {
        let success = iterations < max_iterations;
        let message = if iterations >= max_iterations {
            "Reached max iterations"
        } else {
            "Task completed"
        };
        self.event_bus.publish(AgentEvent::RunCompleted {
            run_id,
            success,
            iterations,
            timestamp: Utc::now(),
        });
        RunResult {
            success,
            iterations,
            status,
            records,
            message: Some(message.to_string()),
            final_message: None,
        }
    }
}

/// Render a batch's outcomes into the observation entry for the next
/// iteration.
fn summarize_records(records: &[RunRecord]) -> String {
    records
        .iter()
        .map(|record| match record {
            RunRecord::Completed { action, result } if result.success => {
                let text: String = result
                    .result_text()
                    .chars()
                    .take(SUMMARY_RESULT_CHARS)
                    .collect();
                format!("Action '{}' completed successfully. Result: {text}", action.name)
            }
            RunRecord::Completed { action, result } => format!(
                "Action '{}' failed: {}",
                action.name,
                result.error.as_deref().unwrap_or("Unknown error")
            ),
            RunRecord::Failure { error, .. } => error.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
