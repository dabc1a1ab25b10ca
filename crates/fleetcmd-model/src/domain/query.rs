const DEFAULT_LIMIT: usize = 5000;
const DEFAULT_FIELD: &str = "hostname";

/// Filter applied to the target inventory.
///
/// No client-side validation is performed; wildcard semantics are whatever
/// the inventory service implements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetFilter {
    /// Match one device attribute against a pattern, rendered as `field:'pattern'`.
    Field { field: String, pattern: String },
    /// Pre-built filter expression passed through untouched.
    Raw(String),
}

/// Inventory query: a filter plus a result cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetQuery {
    pub filter: TargetFilter,
    pub limit: usize,
}

impl TargetQuery {
    /// Query matching the `hostname` attribute against `pattern`.
    pub fn hostname(pattern: impl Into<String>) -> Self {
        Self::field(DEFAULT_FIELD, pattern)
    }

    /// Query matching an arbitrary device attribute against `pattern`.
    pub fn field(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            filter: TargetFilter::Field {
                field: field.into(),
                pattern: pattern.into(),
            },
            limit: DEFAULT_LIMIT,
        }
    }

    /// Query with a pre-built filter expression.
    pub fn raw(filter: impl Into<String>) -> Self {
        Self {
            filter: TargetFilter::Raw(filter.into()),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Filter expression as sent in the `filter` query parameter.
    pub fn filter_expression(&self) -> String {
        match &self.filter {
            TargetFilter::Field { field, pattern } => format!("{field}:'{pattern}'"),
            TargetFilter::Raw(filter) => filter.clone(),
        }
    }
}
