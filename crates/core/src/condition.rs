//! Condition definitions: the named dimensions of user behavior that
//! event designers may reference from a condition tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::{Literal, LiteralKind};

/// Opaque identifier of a [`ConditionDefinition`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionId(pub String);

impl ConditionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConditionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Declared type of the values logged under a definition's field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Date,
}

impl ValueType {
    /// Whether a right-operand literal is acceptable for this type.
    pub fn accepts(&self, literal: &Literal) -> bool {
        match self {
            ValueType::String => literal.kind() == LiteralKind::String,
            ValueType::Number => literal.kind() == LiteralKind::Number,
            ValueType::Date => literal.is_date_like(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Number => write!(f, "number"),
            ValueType::Date => write!(f, "date"),
        }
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "number" => Ok(ValueType::Number),
            "date" => Ok(ValueType::Date),
            other => Err(format!("unknown value type: '{}'", other)),
        }
    }
}

/// One admissible condition. Immutable once defined; `field_name` is unique
/// across definitions because logs are correlated by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDefinition {
    pub id: ConditionId,
    pub field_name: String,
    pub display_name: String,
    #[serde(rename = "type", alias = "valueType")]
    pub value_type: ValueType,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl ConditionDefinition {
    pub fn new(
        id: impl Into<String>,
        field_name: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        let field_name = field_name.into();
        Self {
            id: ConditionId(id.into()),
            display_name: field_name.clone(),
            field_name,
            value_type,
            created_at: Utc::now(),
            created_by: None,
        }
    }
}
