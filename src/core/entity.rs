//! Entity trait shared by stored records

/// Base trait for stored records
pub trait Entity: Clone + Send + Sync + 'static {
    /// The resource name used in URLs and error messages (e.g., "article")
    fn resource_name() -> &'static str;
}
