//! Structural Contract Checks
//!
//! Fixed-shape invariants a workflow definition must satisfy against its
//! contract: identity, step count, exact step ordering, the completion
//! marker convention, and retry bounds. Each check is an independent
//! predicate returning every violation it found; callers decide how to
//! aggregate.

use thiserror::Error;

use crate::contract::Contract;
use crate::workflow::WorkflowSpec;

/// A workflow definition violating one of the fixed-shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralViolation {
    #[error("Workflow has no steps")]
    EmptyWorkflow,

    #[error("Workflow has an empty id")]
    EmptyWorkflowId,

    #[error("Expected workflow id '{expected}', got '{actual}'")]
    WrongWorkflowId { expected: String, actual: String },

    #[error("Expected {expected} steps, got {actual}")]
    WrongStepCount { expected: usize, actual: usize },

    #[error("Expected step order {expected:?}, got {actual:?}")]
    WrongStepOrder {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Step '{step}' should expect 'STATUS: done'")]
    MissingCompletionMarker { step: String },

    #[error("Step '{step}' max_retries should be 1-3, got {actual}")]
    RetriesOutOfRange { step: String, actual: u32 },
}

/// Checks the base invariants: a non-empty id and at least one step.
pub fn check_shape(spec: &WorkflowSpec) -> Vec<StructuralViolation> {
    let mut violations = Vec::new();

    if spec.id.trim().is_empty() {
        violations.push(StructuralViolation::EmptyWorkflowId);
    }
    if spec.is_empty() {
        violations.push(StructuralViolation::EmptyWorkflow);
    }

    violations
}

/// Checks that the workflow id equals the contract's.
pub fn check_workflow_id(spec: &WorkflowSpec, contract: &Contract) -> Vec<StructuralViolation> {
    if spec.id == contract.workflow_id {
        return Vec::new();
    }
    vec![StructuralViolation::WrongWorkflowId {
        expected: contract.workflow_id.clone(),
        actual: spec.id.clone(),
    }]
}

/// Checks that the step count equals the contract's.
pub fn check_step_count(spec: &WorkflowSpec, contract: &Contract) -> Vec<StructuralViolation> {
    if spec.len() == contract.step_ids.len() {
        return Vec::new();
    }
    vec![StructuralViolation::WrongStepCount {
        expected: contract.step_ids.len(),
        actual: spec.len(),
    }]
}

/// Checks that step ids appear exactly in contract order.
///
/// Order-sensitive and exact: a subset or a reordering both fail.
pub fn check_step_order(spec: &WorkflowSpec, contract: &Contract) -> Vec<StructuralViolation> {
    let actual: Vec<String> = spec.steps.iter().map(|s| s.id.clone()).collect();
    if actual == contract.step_ids {
        return Vec::new();
    }
    vec![StructuralViolation::WrongStepOrder {
        expected: contract.step_ids.clone(),
        actual,
    }]
}

/// Checks that every step declares the `STATUS: done` completion marker.
pub fn check_completion_markers(spec: &WorkflowSpec) -> Vec<StructuralViolation> {
    spec.steps
        .iter()
        .filter(|step| !step.expects_done())
        .map(|step| StructuralViolation::MissingCompletionMarker {
            step: step.id.clone(),
        })
        .collect()
}

/// Checks that every step's retry bound lies within the allowed range.
pub fn check_retry_bounds(spec: &WorkflowSpec) -> Vec<StructuralViolation> {
    spec.steps
        .iter()
        .filter(|step| !step.retries_in_range())
        .map(|step| StructuralViolation::RetriesOutOfRange {
            step: step.id.clone(),
            actual: step.max_retries,
        })
        .collect()
}
