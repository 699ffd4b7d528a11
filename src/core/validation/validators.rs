//! Payload validation against a rule table

use super::rules::RuleTable;
use crate::core::error::ValidationError;
use crate::core::field::Payload;

/// Validate every submitted field against `rules`
///
/// An empty table accepts any payload. Otherwise each payload field must be
/// declared in the table and its value must satisfy the field's rule, if it
/// has one. Declared fields that are absent from the payload are not checked
/// here; use [`validate_required`] for that. Stops at the first violation.
pub fn validate(payload: &Payload, rules: &RuleTable) -> Result<(), ValidationError> {
    if rules.is_empty() {
        return Ok(());
    }

    for (field, value) in payload.iter() {
        match rules.lookup(field) {
            None => {
                return Err(ValidationError::UnknownField {
                    field: field.to_string(),
                });
            }
            Some(None) => {}
            Some(Some(rule)) => rule.check(field, value)?,
        }
    }

    Ok(())
}

/// Check that each of `fields` is present in the payload
pub fn validate_required(payload: &Payload, fields: &[&str]) -> Result<(), ValidationError> {
    match fields.iter().find(|field| !payload.contains(field)) {
        Some(field) => Err(ValidationError::MissingField {
            field: field.to_string(),
        }),
        None => Ok(()),
    }
}
