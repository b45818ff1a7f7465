//! Flowcheck - Workflow Contract Validator
//!
//! Validates declarative, sequential workflow definitions against a
//! contract: the expected pipeline shape, the context keys known before any
//! step runs, and the catalog of keys each step produces. Also resolves
//! `{{variable}}` placeholders in step inputs against an accumulating
//! key/value context.
//!
//! # Architecture
//!
//! The library is organized into four main modules:
//!
//! - [`workflow`]: Data structures and YAML loading for workflow definitions
//! - [`template`]: Placeholder extraction and template resolution
//! - [`contract`]: Expected workflow shape and step-output catalogs
//! - [`validator`]: The check suite and aggregated reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use flowcheck::contract::Contract;
//! use flowcheck::validator::validate_workflow;
//! use flowcheck::workflow::load_workflow;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workflow = load_workflow("workflow.yml")?;
//!     let contract = Contract::compound_engineering_loop();
//!
//!     let report = validate_workflow(&workflow, &contract);
//!     print!("{}", report.render());
//!
//!     if !report.is_passing() {
//!         std::process::exit(1);
//!     }
//!     Ok(())
//! }
//! ```

pub mod contract;
pub mod template;
pub mod validator;
pub mod workflow;

// Re-export commonly used types
pub use contract::Contract;
pub use template::resolve_template;
pub use validator::{validate_workflow, ValidationReport};
pub use workflow::{load_workflow, StepSpec, WorkflowSpec};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "Flowcheck";
