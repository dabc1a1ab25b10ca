mod command;
pub use command::{BASE_COMMAND, unwrap_script, wrap_script};

mod envelope;
pub use envelope::{Extraction, extract_stdout};
