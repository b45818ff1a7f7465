//! Workflow Contract Validation
//!
//! Runs the full check suite for a workflow definition against its
//! contract and collects every outcome into a [`ValidationReport`].
//!
//! # Structure
//!
//! - [`structural`]: fixed-shape invariant checks (id, count, order,
//!   markers, retry bounds)
//! - [`pipeline`]: data-flow checks (variable availability, full-context
//!   resolution)
//!
//! Checks are independent: one failing never short-circuits the others, so
//! a workflow author sees every problem in a single run. The report is
//! owned by the caller; nothing is accumulated globally.

pub mod pipeline;
pub mod structural;

use colored::Colorize;
use log::info;

use crate::contract::Contract;
use crate::workflow::WorkflowSpec;

pub use pipeline::PipelineError;
pub use structural::StructuralViolation;

/// Result of one named check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Human-readable check name
    pub name: String,

    /// Failure description, or None if the check passed
    pub error: Option<String>,
}

impl CheckOutcome {
    /// Returns true if the check passed.
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregated outcomes of a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a passing check.
    pub fn record_pass(&mut self, name: impl Into<String>) {
        self.outcomes.push(CheckOutcome {
            name: name.into(),
            error: None,
        });
    }

    /// Records a failing check with its description.
    pub fn record_fail(&mut self, name: impl Into<String>, error: impl Into<String>) {
        self.outcomes.push(CheckOutcome {
            name: name.into(),
            error: Some(error.into()),
        });
    }

    /// All recorded outcomes, in execution order.
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Number of passing checks.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failing checks.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// True if every check passed.
    pub fn is_passing(&self) -> bool {
        self.failed() == 0
    }

    /// Renders the report for terminal output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(60);

        out.push_str(&rule);
        out.push('\n');

        for outcome in &self.outcomes {
            match &outcome.error {
                None => {
                    out.push_str(&format!("  {} {}\n", "✔".green(), outcome.name));
                }
                Some(error) => {
                    out.push_str(&format!("  {} {}\n", "✘".red(), outcome.name));
                    for line in error.lines() {
                        out.push_str(&format!("      {}\n", line.dimmed()));
                    }
                }
            }
        }

        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "checks {}  pass {}  fail {}\n",
            self.outcomes.len(),
            self.passed(),
            self.failed()
        ));

        out
    }
}

/// Records a check producing a list of violations (empty means pass).
fn record_violations<E: std::fmt::Display>(
    report: &mut ValidationReport,
    name: &str,
    violations: Vec<E>,
) {
    if violations.is_empty() {
        report.record_pass(name);
    } else {
        let joined = violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        report.record_fail(name, joined);
    }
}

/// Runs the full check suite for a workflow against its contract.
///
/// All structural and pipeline checks run unconditionally; every failure
/// is collected into the returned report.
pub fn validate_workflow(spec: &WorkflowSpec, contract: &Contract) -> ValidationReport {
    info!(
        "Validating workflow '{}' against contract '{}'",
        spec.id, contract.workflow_id
    );

    let mut report = ValidationReport::new();

    record_violations(&mut report, "workflow has an id and steps", structural::check_shape(spec));
    record_violations(
        &mut report,
        "workflow id matches contract",
        structural::check_workflow_id(spec, contract),
    );
    record_violations(
        &mut report,
        "step count matches contract",
        structural::check_step_count(spec, contract),
    );
    record_violations(
        &mut report,
        "step ids appear in contract order",
        structural::check_step_order(spec, contract),
    );
    record_violations(
        &mut report,
        "all steps expect STATUS: done",
        structural::check_completion_markers(spec),
    );
    record_violations(
        &mut report,
        "max_retries is between 1-3",
        structural::check_retry_bounds(spec),
    );

    match pipeline::check_variable_availability(spec, contract) {
        Ok(()) => report.record_pass("step inputs resolve from context or earlier step outputs"),
        Err(e) => report.record_fail(
            "step inputs resolve from context or earlier step outputs",
            e.to_string(),
        ),
    }

    record_violations(
        &mut report,
        "full-context resolution leaves no [missing:] markers",
        pipeline::check_full_context_resolution(spec, contract),
    );

    info!(
        "Validation finished: {} passed, {} failed",
        report.passed(),
        report.failed()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::StepSpec;

    fn conforming_workflow() -> WorkflowSpec {
        WorkflowSpec::new(
            "compound-engineering-loop",
            vec![
                StepSpec::new("brainstorm", "Explore {{task}} on {{repo}}").with_max_retries(1),
                StepSpec::new("plan", "Plan from {{brainstorm_output}}").with_max_retries(2),
                StepSpec::new("work", "Implement {{plan_file}}").with_max_retries(3),
                StepSpec::new("review", "Review {{pr_url}}").with_max_retries(2),
                StepSpec::new("compound", "Distill {{review_notes}}").with_max_retries(1),
            ],
        )
    }

    #[test]
    fn test_conforming_workflow_passes_all_checks() {
        let report = validate_workflow(
            &conforming_workflow(),
            &Contract::compound_engineering_loop(),
        );

        assert!(report.is_passing(), "failures: {}", report.render());
        assert_eq!(report.failed(), 0);
        assert_eq!(report.passed(), report.outcomes().len());
    }

    #[test]
    fn test_failures_are_collected_not_short_circuited() {
        let mut workflow = conforming_workflow();
        workflow.id = "wrong-id".to_string();
        workflow.steps[0].max_retries = 0;
        workflow.steps[1].expects = vec!["DONE".to_string()];

        let report = validate_workflow(&workflow, &Contract::compound_engineering_loop());

        assert!(!report.is_passing());
        assert_eq!(report.failed(), 3);
        // The remaining checks still ran and passed.
        assert!(report.passed() > 0);
    }

    #[test]
    fn test_unavailable_variable_fails_pipeline_check() {
        let mut workflow = conforming_workflow();
        workflow.steps[0].input = "Explore {{never_declared}}".to_string();

        let report = validate_workflow(&workflow, &Contract::compound_engineering_loop());
        assert!(!report.is_passing());

        let failing: Vec<_> = report
            .outcomes()
            .iter()
            .filter(|o| !o.passed())
            .collect();
        assert_eq!(failing.len(), 2);
        assert!(failing
            .iter()
            .any(|o| o.error.as_deref().unwrap().contains("never_declared")));
    }

    #[test]
    fn test_report_counts() {
        let mut report = ValidationReport::new();
        report.record_pass("a");
        report.record_fail("b", "boom");

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_passing());
    }

    #[test]
    fn test_report_render_contains_summary() {
        let mut report = ValidationReport::new();
        report.record_pass("first check");
        report.record_fail("second check", "line one\nline two");

        let rendered = report.render();
        assert!(rendered.contains("first check"));
        assert!(rendered.contains("second check"));
        assert!(rendered.contains("line one"));
        assert!(rendered.contains("checks 2  pass 1  fail 1"));
    }
}
