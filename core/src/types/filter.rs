use serde::Serialize;

/// Comparison applied by a filter rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterCondition {
    Equals,
    On,
}

/// Record kind a dynamic filter searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterTarget {
    Person,
    Company,
    Opportunity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRule {
    #[serde(rename = "LHS")]
    pub left: String,
    #[serde(rename = "CONDITION")]
    pub condition: FilterCondition,
    #[serde(rename = "RHS")]
    pub right: String,
}

/// Criteria for the dynamic filter endpoint: all `rules` must hold, and at
/// least one of `or_rules` when any are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub rules: Vec<FilterRule>,
    pub or_rules: Vec<FilterRule>,
    pub contact_type: FilterTarget,
}

impl Filter {
    pub fn new(target: FilterTarget) -> Self {
        Self {
            rules: Vec::new(),
            or_rules: Vec::new(),
            contact_type: target,
        }
    }

    #[must_use]
    pub fn rule(mut self, left: impl Into<String>, condition: FilterCondition, right: impl Into<String>) -> Self {
        self.rules.push(FilterRule {
            left: left.into(),
            condition,
            right: right.into(),
        });
        self
    }

    #[must_use]
    pub fn or_rule(mut self, left: impl Into<String>, condition: FilterCondition, right: impl Into<String>) -> Self {
        self.or_rules.push(FilterRule {
            left: left.into(),
            condition,
            right: right.into(),
        });
        self
    }

    /// Filter matching records tagged with `tag`.
    pub fn tagged(target: FilterTarget, tag: impl Into<String>) -> Self {
        Self::new(target).rule("tags", FilterCondition::Equals, tag)
    }
}
