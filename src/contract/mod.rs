//! Workflow Contracts
//!
//! A [`Contract`] captures what a workflow definition is supposed to look
//! like from the outside: its identifier, the exact ordered step sequence,
//! the context keys known before any step runs, and the catalog of keys each
//! step is documented to produce.
//!
//! The step-output catalog is maintained by hand. Nothing here verifies that
//! a step's declared outputs match what a real execution would produce; that
//! external-consistency concern stays with whoever maintains the contract.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::workflow::ParseError;

/// Output key every step contributes by convention: its completion marker.
pub const STATUS_KEY: &str = "status";

/// The expected shape and data-flow catalog of a workflow definition.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Contract {
    /// Expected workflow identifier
    pub workflow_id: String,

    /// Expected step ids, in pipeline order
    pub step_ids: Vec<String>,

    /// Context keys available before any step runs
    pub initial_context: BTreeSet<String>,

    /// Per-step catalog of produced context keys
    pub step_outputs: BTreeMap<String, Vec<String>>,
}

impl Contract {
    /// Creates a contract and normalizes its output catalog.
    pub fn new(
        workflow_id: impl Into<String>,
        step_ids: Vec<String>,
        initial_context: BTreeSet<String>,
        step_outputs: BTreeMap<String, Vec<String>>,
    ) -> Self {
        let mut contract = Self {
            workflow_id: workflow_id.into(),
            step_ids,
            initial_context,
            step_outputs,
        };
        contract.normalize();
        contract
    }

    /// Ensures every cataloged step lists the `status` key.
    ///
    /// Every step emits a completion marker, so `status` is always part of
    /// its declared outputs even when a contract author leaves it out.
    fn normalize(&mut self) {
        for outputs in self.step_outputs.values_mut() {
            if !outputs.iter().any(|k| k == STATUS_KEY) {
                outputs.push(STATUS_KEY.to_string());
            }
        }
    }

    /// Declared output keys for a step, empty if the step is not cataloged.
    pub fn outputs_for(&self, step_id: &str) -> &[String] {
        self.step_outputs
            .get(step_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Union of the initial context and every cataloged output key.
    pub fn all_keys(&self) -> BTreeSet<String> {
        let mut keys = self.initial_context.clone();
        for outputs in self.step_outputs.values() {
            keys.extend(outputs.iter().cloned());
        }
        keys
    }

    /// Builds a fully-populated context with one synthetic value per key.
    ///
    /// Used to confirm that resolving every step input leaves no
    /// `[missing:]` marker behind.
    pub fn synthetic_context(&self) -> HashMap<String, String> {
        self.all_keys()
            .into_iter()
            .map(|key| {
                let value = format!("value-{}", key);
                (key, value)
            })
            .collect()
    }

    /// The built-in contract for the compound-engineering-loop workflow.
    pub fn compound_engineering_loop() -> Self {
        let initial_context: BTreeSet<String> = [
            "task",
            "repo",
            "branch",
            "review_issues",
            "brainstorm_output",
            "plan_file",
            "plan_summary",
            "implementation_summary",
            "files_changed",
            "pr_url",
            "review_notes",
            "decision",
            "learnings",
            "file_created",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let step_outputs: BTreeMap<String, Vec<String>> = [
            ("brainstorm", vec!["brainstorm_output"]),
            ("plan", vec!["plan_file", "plan_summary"]),
            ("work", vec!["implementation_summary", "files_changed", "pr_url"]),
            ("review", vec!["review_notes", "review_issues", "decision"]),
            ("compound", vec!["learnings", "file_created"]),
        ]
        .into_iter()
        .map(|(id, outputs)| {
            (
                id.to_string(),
                outputs.into_iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect();

        Self::new(
            "compound-engineering-loop",
            ["brainstorm", "plan", "work", "review", "compound"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            initial_context,
            step_outputs,
        )
    }
}

/// Loads a contract from a YAML file.
pub fn load_contract(path: impl AsRef<Path>) -> Result<Contract, ParseError> {
    let path = path.as_ref();
    info!("Loading contract from: {}", path.display());

    let yaml_content = fs::read_to_string(path).map_err(|e| ParseError::Read {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut contract: Contract =
        serde_yaml::from_str(&yaml_content).map_err(|e| ParseError::Yaml {
            path: path.display().to_string(),
            source: e,
        })?;
    contract.normalize();

    info!(
        "Contract '{}' loaded: {} steps, {} initial keys",
        contract.workflow_id,
        contract.step_ids.len(),
        contract.initial_context.len()
    );

    Ok(contract)
}

/// Saves a contract to a YAML file.
pub fn save_contract(contract: &Contract, path: impl AsRef<Path>) -> Result<(), ParseError> {
    let path = path.as_ref();
    let yaml_content = serde_yaml::to_string(contract)?;
    fs::write(path, yaml_content).map_err(|e| ParseError::Write {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("Contract saved to: {}", path.display());
    Ok(())
}
