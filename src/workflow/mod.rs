//! Workflow Definition Module
//!
//! Provides data structures and loading utilities for declarative workflow
//! definitions.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (StepSpec, WorkflowSpec)
//! - [`parser`]: YAML loading and saving

pub mod model;
pub mod parser;

pub use model::{StepSpec, WorkflowSpec, MAX_RETRIES, MIN_RETRIES, STATUS_DONE};
pub use parser::{load_workflow, save_workflow, ParseError};
