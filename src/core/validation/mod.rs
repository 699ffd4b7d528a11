//! Request field validation
//!
//! Endpoints declare the fields they accept in a [`RuleTable`]; each field may
//! carry a [`FieldRule`] (an allowed-value set or a regex). Payloads are
//! checked before any handler logic runs.

pub mod extractor;
pub mod rules;
pub mod validators;

pub use extractor::{EndpointRules, ValidatedBody, ValidatedQuery};
pub use rules::{FieldRule, RuleTable};
pub use validators::{validate, validate_required};
