//! # Actuator Core
//!
//! Domain types, traits, and error definitions for the Actuator agent
//! control core. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod action;
pub mod context;
pub mod error;
pub mod event;
pub mod provider;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use action::{Action, ActionResult, ActionType};
pub use context::{ContextEntry, Conversation, Role};
pub use error::{Error, ProtocolError, ProviderError, Result, ToolError};
pub use event::{AgentEvent, EventBus};
pub use provider::{
    GenerationChunk, GenerationProvider, GenerationRequest, GenerationResponse, StructuredCall,
    ToolChoice, ToolDefinition, Usage,
};
pub use tool::{ParameterType, Tool, ToolParameter, ToolRegistry};
