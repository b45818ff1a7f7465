//! Workflow Data Model
//!
//! Core data structures representing a declarative workflow definition:
//! a named pipeline of sequential steps, each with an input template,
//! expected completion markers, and a retry bound.
//!
//! # Example YAML Format
//!
//! ```yaml
//! id: compound-engineering-loop
//! steps:
//!   - id: brainstorm
//!     input: |
//!       Explore approaches for {{task}} on {{repo}}.
//!     expects:
//!       - "STATUS: done"
//!     max_retries: 2
//!
//!   - id: plan
//!     input: |
//!       Turn {{brainstorm_output}} into a plan.
//!     expects: "STATUS: done"
//!     max_retries: 3
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The completion marker every step is expected to declare.
pub const STATUS_DONE: &str = "STATUS: done";

/// Inclusive lower bound for a step's retry count.
pub const MIN_RETRIES: u32 = 1;

/// Inclusive upper bound for a step's retry count.
pub const MAX_RETRIES: u32 = 3;

/// A single step in a workflow pipeline.
///
/// Each step declares an input template (with `{{variable}}` placeholders),
/// the output markers it is expected to emit on completion, and how many
/// times an orchestrator may retry it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StepSpec {
    /// Unique identifier for this step
    pub id: String,

    /// Input template with `{{variable}}` placeholders
    #[serde(default)]
    pub input: String,

    /// Completion markers this step is expected to emit
    #[serde(deserialize_with = "single_or_vec", default)]
    pub expects: Vec<String>,

    /// Maximum retry attempts allowed for this step
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Default retry count for steps that don't specify one.
fn default_max_retries() -> u32 {
    MIN_RETRIES
}

/// Deserializes either a single string or an array of strings into Vec<String>
fn single_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Value::deserialize(deserializer)?;
    match val {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s]),
        Value::Array(arr) => arr
            .into_iter()
            .map(|v| match v {
                Value::String(s) => Ok(s),
                _ => Err(de::Error::custom("Expected string in array")),
            })
            .collect(),
        _ => Err(de::Error::custom("Expected string or array of strings")),
    }
}

impl StepSpec {
    /// Creates a new step with the given id and input template.
    ///
    /// The step starts out expecting the standard completion marker and
    /// permitting a single attempt.
    ///
    /// # Example
    ///
    /// ```
    /// use flowcheck::workflow::StepSpec;
    ///
    /// let step = StepSpec::new("plan", "Plan the work for {{task}}")
    ///     .with_max_retries(2);
    /// assert_eq!(step.id, "plan");
    /// assert_eq!(step.max_retries, 2);
    /// ```
    pub fn new(id: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            input: input.into(),
            expects: vec![STATUS_DONE.to_string()],
            max_retries: MIN_RETRIES,
        }
    }

    /// Replaces the expected completion markers.
    pub fn with_expects(mut self, expects: Vec<String>) -> Self {
        self.expects = expects;
        self
    }

    /// Sets the retry bound for this step.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Returns true if this step declares the standard completion marker.
    pub fn expects_done(&self) -> bool {
        self.expects.iter().any(|m| m == STATUS_DONE)
    }

    /// Returns true if this step's retry bound lies within the allowed range.
    pub fn retries_in_range(&self) -> bool {
        (MIN_RETRIES..=MAX_RETRIES).contains(&self.max_retries)
    }
}

/// A complete workflow definition: an identifier and an ordered pipeline
/// of steps.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorkflowSpec {
    /// Workflow identifier
    pub id: String,

    /// Ordered list of steps in the pipeline
    pub steps: Vec<StepSpec>,
}

impl WorkflowSpec {
    /// Creates a workflow from an id and a list of steps.
    pub fn new(id: impl Into<String>, steps: Vec<StepSpec>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            steps,
        }
    }

    /// Gets a step by id.
    pub fn get_step(&self, id: &str) -> Option<&StepSpec> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Returns the ordered step ids.
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id.as_str()).collect()
    }

    /// Returns the number of steps in the pipeline.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the workflow has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_creation() {
        let step = StepSpec::new("brainstorm", "Think about {{task}}").with_max_retries(2);

        assert_eq!(step.id, "brainstorm");
        assert_eq!(step.input, "Think about {{task}}");
        assert_eq!(step.expects, vec![STATUS_DONE.to_string()]);
        assert_eq!(step.max_retries, 2);
    }

    #[test]
    fn test_step_expects_done() {
        let step = StepSpec::new("plan", "Plan {{task}}");
        assert!(step.expects_done());

        let step = step.with_expects(vec!["DONE".to_string()]);
        assert!(!step.expects_done());
    }

    #[test]
    fn test_step_retries_in_range() {
        assert!(StepSpec::new("a", "").with_max_retries(1).retries_in_range());
        assert!(StepSpec::new("a", "").with_max_retries(3).retries_in_range());
        assert!(!StepSpec::new("a", "").with_max_retries(0).retries_in_range());
        assert!(!StepSpec::new("a", "").with_max_retries(4).retries_in_range());
    }

    #[test]
    fn test_workflow_step_lookup() {
        let workflow = WorkflowSpec::new(
            "demo",
            vec![
                StepSpec::new("first", "do {{task}}"),
                StepSpec::new("second", "review {{task}}"),
            ],
        );

        assert_eq!(workflow.len(), 2);
        assert!(!workflow.is_empty());
        assert!(workflow.get_step("first").is_some());
        assert!(workflow.get_step("missing").is_none());
        assert_eq!(workflow.step_ids(), vec!["first", "second"]);
    }

    #[test]
    fn test_deserialize_expects_single_string() {
        let yaml = r#"
id: step1
input: "hello {{task}}"
expects: "STATUS: done"
max_retries: 2
"#;
        let step: StepSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(step.expects, vec![STATUS_DONE.to_string()]);
    }

    #[test]
    fn test_deserialize_expects_list() {
        let yaml = r#"
id: step1
input: "hello"
expects:
  - "STATUS: done"
  - "ARTIFACT: created"
max_retries: 1
"#;
        let step: StepSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(step.expects.len(), 2);
    }

    #[test]
    fn test_deserialize_defaults() {
        let yaml = "id: bare\n";
        let step: StepSpec = serde_yaml::from_str(yaml).unwrap();
        assert!(step.input.is_empty());
        assert!(step.expects.is_empty());
        assert_eq!(step.max_retries, MIN_RETRIES);
    }

    #[test]
    fn test_workflow_trims_id() {
        let workflow = WorkflowSpec::new("  spaced  ", vec![]);
        assert_eq!(workflow.id, "spaced");
    }
}
