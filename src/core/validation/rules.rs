//! Declarative field rules
//!
//! A [`RuleTable`] names every field an endpoint accepts and optionally
//! attaches a [`FieldRule`] to it. A field declared without a rule accepts
//! any value.

use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use regex::Regex;

/// Constraint on the value of a single field
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Value must be one of an enumerated set
    ///
    /// `Null` is accepted only when `nullable` is set.
    AllowedValues {
        values: Vec<FieldValue>,
        nullable: bool,
    },

    /// The string form of the value must contain a match of the regex
    Pattern(Regex),
}

impl FieldRule {
    /// Allowed-values rule, not nullable
    pub fn allowed<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FieldValue>,
    {
        FieldRule::AllowedValues {
            values: values.into_iter().map(Into::into).collect(),
            nullable: false,
        }
    }

    /// Mark an allowed-values rule as accepting `Null`
    ///
    /// Pattern rules are returned unchanged.
    pub fn nullable(self) -> Self {
        match self {
            FieldRule::AllowedValues { values, .. } => FieldRule::AllowedValues {
                values,
                nullable: true,
            },
            pattern => pattern,
        }
    }

    /// Pattern rule compiled from a regular expression
    pub fn pattern(regex: &str) -> Result<Self, regex::Error> {
        Ok(FieldRule::Pattern(Regex::new(regex)?))
    }

    /// Check a single value against this rule
    pub fn check(&self, field: &str, value: &FieldValue) -> Result<(), ValidationError> {
        let accepted = match self {
            FieldRule::AllowedValues { values, nullable } => {
                (value.is_null() && *nullable) || values.contains(value)
            }
            FieldRule::Pattern(regex) => regex.is_match(&value.string_form()),
        };

        if accepted {
            Ok(())
        } else {
            Err(ValidationError::InvalidValue {
                field: field.to_string(),
                allowed: self.allowed_list(),
            })
        }
    }

    /// Permitted values rendered for error messages (empty for patterns)
    pub fn allowed_list(&self) -> Vec<String> {
        match self {
            FieldRule::AllowedValues { values, .. } => values
                .iter()
                .filter(|v| !v.is_null())
                .map(|v| v.to_string())
                .collect(),
            FieldRule::Pattern(_) => Vec::new(),
        }
    }
}

/// Per-endpoint table of accepted fields and their rules
///
/// # Example
///
/// ```rust,ignore
/// let rules = RuleTable::new()
///     .rule("sortOrder", FieldRule::allowed(["ASC", "DESC"]))
///     .rule("limit", FieldRule::pattern(r"^\d+$")?)
///     .field("title");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: IndexMap<String, Option<FieldRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Declare a field that accepts any value
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.rules.insert(name.into(), None);
        self
    }

    /// Declare a field constrained by `rule`
    pub fn rule(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.insert(name.into(), Some(rule));
        self
    }

    /// Look up a field
    ///
    /// `None` means the field is not declared; `Some(None)` means it is
    /// declared without a rule.
    pub fn lookup(&self, field: &str) -> Option<Option<&FieldRule>> {
        self.rules.get(field).map(Option::as_ref)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.rules.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}
