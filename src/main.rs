use pg_lag_check::postgres::PgConnection;
use pg_lag_check::report::{report, report_error};
use pg_lag_check::{measure, CheckStatus, Config};
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FORMAT_VAR: &str = "PG_LAG_CHECK_LOG_FORMAT";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    run().await.into()
}

async fn run() -> CheckStatus {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => return report_error(&e, &mut stderr),
    };
    debug!(?config, "Configuration resolved");

    let conn = match PgConnection::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => return report_error(&e, &mut stderr),
    };

    let outcome = measure(conn, &mut stdout).await;
    let status = report(outcome, &mut stdout, &mut stderr);

    info!(exit_code = status.code(), "Check finished");
    status
}

/// Logs go to stderr; stdout carries only the report.
fn init_logging() {
    let json = std::env::var(LOG_FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pg_lag_check=warn"));

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
