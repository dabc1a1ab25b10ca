use serde_json::Value;

use fleetcmd_model::TargetId;

/// Outcome of reading one target's stdout out of a result envelope.
///
/// Absence is a normal outcome, not an error: any missing or mis-shaped
/// level of the envelope yields [`Extraction::Absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The envelope carried stdout for the target.
    Output(String),
    /// No stdout for the target; nothing to print.
    Absent,
}

impl Extraction {
    pub fn into_output(self) -> Option<String> {
        match self {
            Extraction::Output(stdout) => Some(stdout),
            Extraction::Absent => None,
        }
    }
}

/// Extract `combined.resources.<target>.stdout` from a raw response body.
///
/// The service emits single-quoted JSON, so every `'` in the body is
/// rewritten to `"` before parsing. The substitution is global: output that
/// legitimately contains a single quote breaks the parse and extraction
/// falls back to [`Extraction::Absent`].
pub fn extract_stdout(raw: &[u8], target: &TargetId) -> Extraction {
    let body = String::from_utf8_lossy(raw);
    let normalized = body.replace('\'', "\"");

    let envelope: Value = match serde_json::from_str(&normalized) {
        Ok(value) => value,
        Err(_) => return Extraction::Absent,
    };

    let stdout = envelope
        .get("combined")
        .and_then(|combined| combined.get("resources"))
        .and_then(|resources| resources.get(target.as_str()))
        .and_then(|resource| resource.get("stdout"))
        .and_then(Value::as_str);

    match stdout {
        Some(stdout) => Extraction::Output(stdout.to_string()),
        None => Extraction::Absent,
    }
}
