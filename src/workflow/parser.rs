//! Workflow Parser
//!
//! Handles loading and saving workflow definitions as YAML files. Parsing
//! only establishes the document shape; contract conformance is the
//! validator's job.

use std::fs;
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

use super::model::WorkflowSpec;

/// Errors raised while loading or saving a workflow document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read '{path}': {source}. Check that the file exists and is readable.")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse workflow YAML in '{path}': {source}. Check the file format.")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize workflow: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Loads a workflow definition from a YAML file.
///
/// # Arguments
///
/// * `path` - Path to the workflow YAML file
///
/// # Example
///
/// ```rust,no_run
/// use flowcheck::workflow::load_workflow;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let workflow = load_workflow("workflow.yml")?;
///     println!("Loaded {} steps", workflow.steps.len());
///     Ok(())
/// }
/// ```
pub fn load_workflow(path: impl AsRef<Path>) -> Result<WorkflowSpec, ParseError> {
    let path = path.as_ref();
    info!("Loading workflow from: {}", path.display());

    let yaml_content = fs::read_to_string(path).map_err(|e| ParseError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!("YAML content loaded ({} bytes)", yaml_content.len());

    let workflow: WorkflowSpec =
        serde_yaml::from_str(&yaml_content).map_err(|e| ParseError::Yaml {
            path: path.display().to_string(),
            source: e,
        })?;

    info!(
        "Parsed workflow '{}' with {} steps",
        workflow.id,
        workflow.steps.len()
    );

    Ok(workflow)
}

/// Saves a workflow definition to a YAML file.
pub fn save_workflow(workflow: &WorkflowSpec, path: impl AsRef<Path>) -> Result<(), ParseError> {
    let path = path.as_ref();
    let yaml_content = serde_yaml::to_string(workflow)?;
    fs::write(path, yaml_content).map_err(|e| ParseError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Workflow saved to: {}", path.display());
    Ok(())
}
