/// Base command understood by the remote execution engine.
pub const BASE_COMMAND: &str = "runscript";

const WRAP_PREFIX: &str = "runscript -Raw=```";
const WRAP_SUFFIX: &str = "```";

/// Wrap a script body in the engine's raw-script invocation syntax.
///
/// The triple-backtick delimiters tolerate any body that does not itself
/// contain the delimiter sequence; this is an accepted limitation, not an
/// escaping scheme.
pub fn wrap_script(script: &str) -> String {
    format!("{WRAP_PREFIX}{script}{WRAP_SUFFIX}")
}

/// Recover the script body from a wrapped wire command.
///
/// Returns `None` when `wire` is not a raw-script invocation.
pub fn unwrap_script(wire: &str) -> Option<&str> {
    wire.strip_prefix(WRAP_PREFIX)?.strip_suffix(WRAP_SUFFIX)
}
