//! OR-groups of AND-conditions.
//!
//! The builder never holds an empty group: a group with no conditions shows
//! one blank row, and a decision with no groups shows one blank group. Every
//! edit re-serializes the whole structure.

use flow_canvas::model::{Condition, ConditionGroup, ConditionLogic, ConditionOperator};

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionBuilder {
    groups: Vec<ConditionGroup>,
}

fn blank_group() -> ConditionGroup {
    ConditionGroup {
        logic: ConditionLogic::And,
        conditions: vec![Condition::default()],
    }
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ConditionBuilder {
    pub fn new(groups: &[ConditionGroup]) -> Self {
        let mut groups = groups.to_vec();
        if groups.is_empty() {
            groups.push(blank_group());
        }
        for group in &mut groups {
            if group.conditions.is_empty() {
                group.conditions.push(Condition::default());
            }
        }
        Self { groups }
    }

    pub fn groups(&self) -> &[ConditionGroup] {
        &self.groups
    }

    pub fn condition(&self, group: usize, index: usize) -> Option<&Condition> {
        self.groups.get(group)?.conditions.get(index)
    }

    fn condition_mut(&mut self, group: usize, index: usize) -> Option<&mut Condition> {
        self.groups.get_mut(group)?.conditions.get_mut(index)
    }

    pub fn add_group(&mut self) {
        self.groups.push(blank_group());
    }

    /// The first group stays.
    pub fn remove_group(&mut self, group: usize) -> bool {
        if group == 0 || group >= self.groups.len() {
            return false;
        }
        self.groups.remove(group);
        true
    }

    pub fn add_condition(&mut self, group: usize) -> bool {
        match self.groups.get_mut(group) {
            Some(g) => {
                g.conditions.push(Condition::default());
                true
            }
            None => false,
        }
    }

    /// Refused for the last condition of a group.
    pub fn remove_condition(&mut self, group: usize, index: usize) -> bool {
        match self.groups.get_mut(group) {
            Some(g) if g.conditions.len() > 1 && index < g.conditions.len() => {
                g.conditions.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn set_field(&mut self, group: usize, index: usize, field_path: impl Into<String>) -> bool {
        self.condition_mut(group, index)
            .map(|c| c.field_path = field_path.into())
            .is_some()
    }

    pub fn set_operator(&mut self, group: usize, index: usize, operator: ConditionOperator) -> bool {
        self.condition_mut(group, index)
            .map(|c| c.operator = operator)
            .is_some()
    }

    pub fn set_value(&mut self, group: usize, index: usize, value: impl Into<String>) -> bool {
        self.condition_mut(group, index)
            .map(|c| c.value = value.into())
            .is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.groups)
    }
}
