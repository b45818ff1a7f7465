//! Pipeline Context Tracking
//!
//! Checks the data-flow side of a workflow contract. The pipeline is a
//! simple chain: a step may reference only variables present in the initial
//! context or produced by a strictly earlier step, never its own outputs or
//! a later step's. The context tracker walks the steps in declared order,
//! growing the available-key set with each step's cataloged outputs.

use std::collections::BTreeSet;

use log::debug;
use thiserror::Error;

use crate::contract::Contract;
use crate::template::{contains_missing, extract_placeholder_names, resolve_template};
use crate::workflow::WorkflowSpec;

/// Maximum length of the resolved-input snippet carried in diagnostics.
const SNIPPET_LEN: usize = 200;

/// Data-flow failures found while walking the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(
        "Step '{step}' references {{{{{variable}}}}} which is not available. Available: {}",
        .available.join(", ")
    )]
    UnresolvedVariable {
        step: String,
        variable: String,
        available: Vec<String>,
    },

    #[error("Step '{step}' resolved input contains [missing:]: {snippet}")]
    UnresolvedPlaceholder { step: String, snippet: String },
}

/// Checks that every step input only references already-available variables.
///
/// Walks the steps in declared order, starting from the contract's initial
/// context. Placeholder names are matched exactly as written; the resolver's
/// lowercase fallback does not apply here, because the catalog lists literal
/// key names.
///
/// Fails on the first unavailable variable, reporting the step, the
/// variable, and the keys that were available at that point.
pub fn check_variable_availability(
    spec: &WorkflowSpec,
    contract: &Contract,
) -> Result<(), PipelineError> {
    let mut available: BTreeSet<String> = contract.initial_context.clone();

    for step in &spec.steps {
        for variable in extract_placeholder_names(&step.input) {
            if !available.contains(&variable) {
                return Err(PipelineError::UnresolvedVariable {
                    step: step.id.clone(),
                    variable,
                    available: available.iter().cloned().collect(),
                });
            }
        }

        // This step's declared outputs become visible to later steps only.
        let outputs = contract.outputs_for(&step.id);
        debug!("Step '{}' contributes {} keys", step.id, outputs.len());
        available.extend(outputs.iter().cloned());
    }

    Ok(())
}

/// Resolves every step input against a fully-populated synthetic context
/// and reports any surviving `[missing:]` marker.
///
/// With one value per key across the initial context and the whole output
/// catalog, a marker can only survive if a template references a variable
/// the contract knows nothing about.
pub fn check_full_context_resolution(
    spec: &WorkflowSpec,
    contract: &Contract,
) -> Vec<PipelineError> {
    let context = contract.synthetic_context();
    let mut errors = Vec::new();

    for step in &spec.steps {
        let resolved = resolve_template(&step.input, &context);
        if contains_missing(&resolved) {
            errors.push(PipelineError::UnresolvedPlaceholder {
                step: step.id.clone(),
                snippet: resolved.chars().take(SNIPPET_LEN).collect(),
            });
        }
    }

    errors
}
