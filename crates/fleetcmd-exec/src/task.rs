use std::sync::Arc;

use tracing::{debug, warn};

use fleetcmd_client::{ClientError, ExecClient};
use fleetcmd_model::{TargetId, TimeoutPolicy};
use fleetcmd_wire::{BASE_COMMAND, Extraction, extract_stdout, wrap_script};

/// Run the two-call session protocol for one target and print its stdout.
///
/// Every failure is contained here: a failed call is logged with the
/// offending target and the run simply produces no output. Nothing escapes
/// the task boundary, so one broken target never affects the others.
pub async fn run_target(
    client: Arc<ExecClient>,
    target: TargetId,
    script: Arc<str>,
    timeouts: TimeoutPolicy,
) {
    if let Err(error) = execute(&client, &target, &script, &timeouts).await {
        warn!(host = %target, %error, "target run failed");
    }
}

async fn execute(
    client: &ExecClient,
    target: &TargetId,
    script: &str,
    timeouts: &TimeoutPolicy,
) -> Result<(), ClientError> {
    // one session per target; never shared, never reused
    let hosts = [target.clone()];
    let session = client.init_session(&hosts, &timeouts.session).await?;
    debug!(host = %target, %session, "session ready");

    let command = wrap_script(script);
    let raw = client
        .run_command(&session, BASE_COMMAND, &command, &timeouts.command, &hosts)
        .await?;

    match extract_stdout(&raw, target) {
        Extraction::Output(stdout) => println!("{stdout}"),
        // nothing for this target in the envelope; absence is not an error
        Extraction::Absent => debug!(host = %target, "no output in envelope"),
    }
    Ok(())
}
