//! Id lookup over a snapshot of condition definitions.

use std::collections::{HashMap, HashSet};

use questline_core::{ConditionDefinition, ConditionId};

/// Definitions keyed by id. Ids supplied more than once are tracked as
/// ambiguous; lookups return the first definition seen.
pub(crate) struct DefinitionIndex<'a> {
    by_id: HashMap<&'a str, &'a ConditionDefinition>,
    ambiguous: HashSet<&'a str>,
}

impl<'a> DefinitionIndex<'a> {
    pub(crate) fn new(definitions: &'a [ConditionDefinition]) -> Self {
        let mut by_id = HashMap::with_capacity(definitions.len());
        let mut ambiguous = HashSet::new();
        for def in definitions {
            if by_id.contains_key(def.id.as_str()) {
                ambiguous.insert(def.id.as_str());
            } else {
                by_id.insert(def.id.as_str(), def);
            }
        }
        Self { by_id, ambiguous }
    }

    pub(crate) fn get(&self, id: &ConditionId) -> Option<&'a ConditionDefinition> {
        self.by_id.get(id.as_str()).copied()
    }

    pub(crate) fn is_ambiguous(&self, id: &ConditionId) -> bool {
        self.ambiguous.contains(id.as_str())
    }
}
