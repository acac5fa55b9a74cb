use anyhow::Result;
use followcheck_common::observability::{LogConfig, LogFormat, init_logging};
use followcheck_config::{FollowcheckConfig, FollowcheckConfigLoader};

mod prompt;
mod run;
mod store;

#[tokio::main]
async fn main() -> Result<()> {
    // Config is optional: no file and no env means stock defaults.
    let cfg: FollowcheckConfig = FollowcheckConfigLoader::new()
        .with_file("followcheck.yaml")
        .load()?;

    init_logging(LogConfig {
        app_name: "followcheck",
        log_dir: cfg.log.dir.clone().map(Into::into),
        emit_stderr: cfg.log.stderr,
        format: if cfg.log.json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        ..LogConfig::default()
    })?;

    // Single error sink for the whole run: log the stage, report, exit non-zero.
    if let Err(err) = run::run(&cfg).await {
        tracing::error!(stage = err.stage(), error = %err, "run failed");
        eprintln!("followcheck: {err}");
        std::process::exit(1);
    }
    Ok(())
}
