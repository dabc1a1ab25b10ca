const SESSION_TIMEOUT_SECS: u32 = 30;
const SESSION_TIMEOUT_DURATION: &str = "30s";
const COMMAND_TIMEOUT_SECS: u32 = 30;
const COMMAND_TIMEOUT_DURATION: &str = "10m";

/// Server-side timeout sent as two independent query parameters.
///
/// The remote API takes a numeric `timeout` and a `timeout_duration` string
/// and does not derive one from the other; callers always supply both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireTimeout {
    pub secs: u32,
    pub duration: String,
}

impl WireTimeout {
    pub fn new(secs: u32, duration: impl Into<String>) -> Self {
        Self {
            secs,
            duration: duration.into(),
        }
    }
}

/// Timeouts for the two calls of the session protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// Applied when the batch session is initialized.
    pub session: WireTimeout,
    /// Applied when the command is dispatched into the session.
    pub command: WireTimeout,
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self {
            session: WireTimeout::new(SESSION_TIMEOUT_SECS, SESSION_TIMEOUT_DURATION),
            command: WireTimeout::new(COMMAND_TIMEOUT_SECS, COMMAND_TIMEOUT_DURATION),
        }
    }
}
