//! The control loop — the heart of Actuator.
//!
//! A run follows a **Generate → Act → Observe** cycle:
//!
//! 1. **Prompt** the provider with the task (or, on later iterations, the
//!    trailing window of the conversation)
//! 2. **Translate** the response into typed actions
//! 3. **Dispatch** each action through the executor, in order
//! 4. **Fold** the results back into the conversation as observations
//!
//! The loop stops when a `Finish` action executes, the generator yields
//! no actions, an error escapes an iteration, or the iteration cap is
//! reached.

pub mod executor;
pub mod generator;
pub mod loop_runner;

pub use executor::ActionExecutor;
pub use generator::ActionGenerator;
pub use loop_runner::{AgentLoop, RunRecord, RunResult, RunStatus};
