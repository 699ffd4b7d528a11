//! List parameters and pagination utilities

use crate::config::ListingConfig;
use crate::core::error::{ApiResult, ValidationError};
use crate::core::field::{FieldValue, Payload};
use crate::core::validation::{EndpointRules, FieldRule, RuleTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Column an article listing is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    Body,
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Title,
        SortField::Body,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    /// Name accepted in the `sortField` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Body => "body",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ASC" => Some(SortOrder::Asc),
            "DESC" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering and paging for the article listing
///
/// # Example
/// ```rust,ignore
/// GET /article/?sortField=title&sortOrder=ASC&limit=10&offset=20
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            sort_field: SortField::CreatedAt,
            sort_order: SortOrder::Desc,
            limit: ListingConfig::default().default_limit,
            offset: 0,
        }
    }
}

impl ListParams {
    /// Build list parameters from a query payload already checked against
    /// [`ListQueryRules`]
    ///
    /// Absent or null fields take their defaults; `limit` is capped at
    /// `listing.max_limit`.
    pub fn from_payload(payload: &Payload, listing: &ListingConfig) -> ApiResult<Self> {
        let mut params = ListParams {
            limit: listing.default_limit,
            ..Default::default()
        };

        if let Some(value) = present(payload, "sortField") {
            params.sort_field = SortField::parse(&value.string_form()).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "sortField".to_string(),
                    allowed: SortField::ALL.iter().map(|f| f.as_str().to_string()).collect(),
                }
            })?;
        }

        if let Some(value) = present(payload, "sortOrder") {
            params.sort_order = SortOrder::parse(&value.string_form()).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "sortOrder".to_string(),
                    allowed: vec!["ASC".to_string(), "DESC".to_string()],
                }
            })?;
        }

        if let Some(value) = present(payload, "limit") {
            params.limit = parse_count("limit", value)?;
        }
        if let Some(value) = present(payload, "offset") {
            params.offset = parse_count("offset", value)?;
        }

        params.limit = params.limit.min(listing.max_limit);
        Ok(params)
    }
}

fn present<'a>(payload: &'a Payload, field: &str) -> Option<&'a FieldValue> {
    payload.get(field).filter(|v| !v.is_null())
}

fn parse_count(field: &str, value: &FieldValue) -> Result<u64, ValidationError> {
    let parsed = match value {
        FieldValue::Integer(i) => u64::try_from(*i).ok(),
        other => other.string_form().parse::<u64>().ok(),
    };
    parsed.ok_or_else(|| ValidationError::InvalidValue {
        field: field.to_string(),
        allowed: Vec::new(),
    })
}

/// Accepted query fields for `GET /article/`
pub struct ListQueryRules;

impl EndpointRules for ListQueryRules {
    fn rules() -> &'static RuleTable {
        static RULES: OnceLock<RuleTable> = OnceLock::new();
        RULES.get_or_init(|| {
            let count = || FieldRule::pattern(r"^\d+$").unwrap();
            RuleTable::new()
                .rule(
                    "sortField",
                    FieldRule::allowed(SortField::ALL.map(|f| f.as_str())).nullable(),
                )
                .rule("sortOrder", FieldRule::allowed(["ASC", "DESC"]))
                .rule("limit", count())
                .rule("offset", count())
        })
    }
}

/// Paginated response structure
///
/// This structure wraps paginated data with metadata about pagination state.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The paginated data
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Number of items requested
    pub limit: u64,

    /// Number of items skipped
    pub offset: u64,

    /// Total number of items
    pub total: u64,

    /// Whether items remain after this page
    pub has_next: bool,
}

impl PaginationMeta {
    pub fn new(params: &ListParams, total: u64) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
            total,
            has_next: params.limit > 0 && params.offset.saturating_add(params.limit) < total,
        }
    }
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &ListParams, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params, total),
        }
    }
}
