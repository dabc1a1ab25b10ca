mod args;
mod env;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use fleetcmd_client::{ApiClient, ClientConfig};
use fleetcmd_exec::{DispatchConfig, Dispatcher, run_target};
use fleetcmd_model::{TargetQuery, TimeoutPolicy};
use fleetcmd_observe::{LoggerConfig, logger_init};

use crate::args::Cli;
use crate::env::{BASE_URL_VAR, EnvSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger_cfg = LoggerConfig {
        format: cli.log_format.parse()?,
        level: cli.log_level.clone(),
        ..Default::default()
    };
    logger_init(&logger_cfg)?;

    let env = EnvSource::load(&cli.env_file)?;
    let creds = env.credentials()?;

    let mut client_cfg = ClientConfig::default();
    if let Some(base_url) = cli.base_url.clone().or_else(|| env.get(BASE_URL_VAR)) {
        client_cfg.base_url = base_url;
    }
    client_cfg.verify_tls = !cli.insecure;

    // fatal path: any failure before dispatch aborts the whole run
    let client = ApiClient::new(&client_cfg)?.authenticate(&creds).await?;

    let query = match &cli.raw_filter {
        Some(filter) => TargetQuery::raw(filter.clone()),
        None => TargetQuery::field(cli.filter_field.clone(), cli.pattern.clone()),
    }
    .with_limit(cli.limit);

    let targets = client.discover_targets(&query).await?;
    info!(count = targets.len(), "targets discovered");

    let client = Arc::new(client);
    let script: Arc<str> = Arc::from(cli.script.as_str());
    let timeouts = TimeoutPolicy::default();

    let dispatcher = Dispatcher::new(DispatchConfig {
        max_in_flight: cli.max_concurrent,
        ..Default::default()
    });

    dispatcher
        .run_all(targets, move |target| {
            run_target(
                Arc::clone(&client),
                target,
                Arc::clone(&script),
                timeouts.clone(),
            )
        })
        .await;

    // per-target failures were logged by their own runs and do not change
    // the exit code
    Ok(())
}
