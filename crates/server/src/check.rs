//! Offline `check` subcommand: validate and evaluate a YAML scenario.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use questline_core::{ConditionDefinition, LoggedEvent};
use questline_rules::{
    ConditionGroup, ConditionTreeValidator, RewardEligibilityEvaluator, ValidationResult,
};

/// A condition tree with the definitions and logs to judge it against.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub definitions: Vec<ConditionDefinition>,
    pub condition: serde_json::Value,
    #[serde(default)]
    pub logs: Vec<LoggedEvent>,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub validation: ValidationResult,
    /// Absent when the condition is not a tree at all.
    pub eligible: Option<bool>,
    pub explanation: Option<String>,
}

impl Scenario {
    pub fn parse(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid scenario YAML")
    }

    pub fn run(&self) -> CheckReport {
        let validation = ConditionTreeValidator::check_json(&self.condition, &self.definitions);
        let tree = ConditionGroup::deserialize(&self.condition).ok();
        CheckReport {
            validation,
            eligible: tree
                .as_ref()
                .map(|t| RewardEligibilityEvaluator::evaluate(t, &self.definitions, &self.logs)),
            explanation: tree
                .as_ref()
                .map(|t| RewardEligibilityEvaluator::explain(t, &self.definitions, &self.logs)),
        }
    }
}

/// Load the scenario at `path`, print the report and fail if the tree is invalid.
pub fn run(path: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let report = Scenario::parse(&raw)?.run();

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.validation.valid {
        anyhow::bail!("{} validation error(s)", report.validation.errors.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
definitions:
  - id: c1
    fieldName: login_streak
    displayName: Login streak
    type: number
condition:
  operator: and
  conditions:
    - leftOperand: { id: c1 }
      operator: gte
      rightOperand: 7
logs:
  - userId: u1
    fieldName: login_streak
    value: 9
"#;

    #[test]
    fn eligible_scenario() {
        let report = Scenario::parse(SCENARIO).unwrap().run();
        assert!(report.validation.valid);
        assert_eq!(report.eligible, Some(true));
        assert_eq!(
            report.explanation.as_deref(),
            Some("AND(login_streak gte 7 = true) = true")
        );
    }

    #[test]
    fn shapeless_condition_has_no_verdict() {
        let scenario = Scenario {
            definitions: Vec::new(),
            condition: serde_json::json!("not a tree"),
            logs: Vec::new(),
        };
        let report = scenario.run();
        assert!(!report.validation.valid);
        assert_eq!(report.eligible, None);
    }

    #[test]
    fn missing_definitions_is_a_parse_error() {
        assert!(Scenario::parse("condition: { operator: and, conditions: [] }").is_err());
    }
}
