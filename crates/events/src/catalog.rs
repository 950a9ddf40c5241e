//! Condition catalog: defining and looking up condition definitions, and
//! checking condition trees against them.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use questline_core::{ConditionDefinition, ConditionId, ValueType};
use questline_rules::{collect_condition_ids, ConditionGroup, ConditionTreeValidator, ValidationResult};

use crate::error::{EventError, Result};
use crate::store::MemoryStore;

/// Input for defining a new condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefineConditionInput {
    pub field_name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

#[derive(Clone)]
pub struct ConditionCatalog {
    store: Arc<MemoryStore>,
}

impl ConditionCatalog {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Define a condition. Field names are unique across definitions.
    pub async fn define(&self, creator: &str, input: DefineConditionInput) -> Result<ConditionDefinition> {
        let field_name = input.field_name.trim();
        if field_name.is_empty() {
            return Err(EventError::Validation("fieldName must not be empty".to_string()));
        }

        let mut guard = self.store.conditions.write().await;
        if guard.values().any(|d| d.field_name == field_name) {
            return Err(EventError::DuplicateFieldName(field_name.to_string()));
        }

        let definition = ConditionDefinition {
            id: ConditionId::new(),
            field_name: field_name.to_string(),
            display_name: input.display_name,
            value_type: input.value_type,
            created_at: Utc::now(),
            created_by: Some(creator.to_string()),
        };
        guard.insert(definition.id.clone(), definition.clone());

        info!(
            condition_id = %definition.id,
            field_name = %definition.field_name,
            value_type = %definition.value_type,
            "condition defined"
        );
        Ok(definition)
    }

    pub async fn find(&self, id: &ConditionId) -> Result<ConditionDefinition> {
        self.store
            .conditions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EventError::not_found("condition", id.as_str()))
    }

    /// Fetch the definitions for the given ids; unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[ConditionId]) -> Vec<ConditionDefinition> {
        let guard = self.store.conditions.read().await;
        ids.iter().filter_map(|id| guard.get(id).cloned()).collect()
    }

    /// List definitions, optionally filtered by a case-insensitive
    /// display-name substring, oldest first.
    pub async fn list(&self, display_name: Option<&str>) -> Vec<ConditionDefinition> {
        let needle = display_name.map(str::to_lowercase);
        let guard = self.store.conditions.read().await;
        let mut list: Vec<ConditionDefinition> = guard
            .values()
            .filter(|d| match &needle {
                Some(n) => d.display_name.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        list
    }

    /// Validate a tree against the definitions its leaves reference.
    pub async fn check_tree(&self, tree: &ConditionGroup) -> ValidationResult {
        let ids = collect_condition_ids(tree);
        let available = self.find_by_ids(&ids).await;
        ConditionTreeValidator::check(tree, &available)
    }

    /// Fail with [`EventError::InvalidCondition`] unless the tree is valid.
    pub async fn assert_valid_tree(&self, tree: &ConditionGroup) -> Result<()> {
        let result = self.check_tree(tree).await;
        if result.valid {
            return Ok(());
        }
        let problems: Vec<String> = result
            .errors
            .iter()
            .map(|e| {
                if e.path.is_empty() {
                    e.message.clone()
                } else {
                    format!("{}: {}", e.path, e.message)
                }
            })
            .collect();
        debug!(?problems, "condition tree rejected");
        Err(EventError::InvalidCondition { problems })
    }
}
