/// Bearer credential obtained from the token exchange.
///
/// Written once at authentication time and read-only afterwards, so it can be
/// shared across concurrent per-target runs without synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    bearer: String,
    kind: String,
}

impl AuthToken {
    pub fn new(bearer: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
            kind: kind.into(),
        }
    }

    /// Token kind as reported by the token endpoint (typically `bearer`).
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Value for the `Authorization` request header.
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.bearer)
    }
}
