//! The lag query and the connection seam it runs over.
//!
//! [`measure`] is the entry point used by the binary: it runs the query once,
//! writes the report lines, and closes the connection exactly once whatever
//! the query outcome was.

use async_trait::async_trait;
use std::io::Write;
use tracing::{debug, info, warn};

use crate::postgres::{LagReading, LagRow};
use crate::Result;

/// Current time, last replay timestamp and their difference in seconds.
///
/// The difference is cast to `double precision` because `EXTRACT` yields
/// `numeric` on PostgreSQL 14 and later.
pub const LAG_QUERY: &str = "SELECT now(), \
     pg_last_xact_replay_timestamp(), \
     EXTRACT(EPOCH FROM (now() - pg_last_xact_replay_timestamp()))::double precision";

/// An open connection able to answer the lag query.
#[async_trait]
pub trait LagConnection: Send {
    /// Runs [`LAG_QUERY`] and returns its single row.
    async fn query_lag(&mut self) -> Result<LagRow>;

    /// Releases the connection. Consumes the handle, so it runs at most once.
    async fn close(self) -> Result<()>;
}

/// Runs the lag query and writes the report lines to `out`.
///
/// Returns the delay in seconds, or `None` when the server reports no replay
/// timestamp. In that case no delay line is written.
pub async fn fetch_lag<C, W>(conn: &mut C, out: &mut W) -> Result<Option<f64>>
where
    C: LagConnection,
    W: Write,
{
    let row = conn.query_lag().await?;
    let reading = LagReading::try_from(row)?;
    debug!(?reading, "Lag query returned");

    writeln!(out, "Current time:            {}", reading.current_time)?;
    match reading.replay_time() {
        Some(replay_time) => writeln!(out, "Replay time:             {}", replay_time)?,
        None => writeln!(out, "Replay time:             NULL")?,
    }

    let Some(delay) = reading.delay_seconds() else {
        info!("No replay timestamp reported");
        return Ok(None);
    };

    writeln!(out, "Replay delay (seconds):  {:.3}", delay)?;
    info!(delay_seconds = delay, "Replay delay measured");
    Ok(Some(delay))
}

/// Runs [`fetch_lag`] and then closes `conn`, on success and on failure.
///
/// A failure to close is logged and does not replace the query outcome.
pub async fn measure<C, W>(mut conn: C, out: &mut W) -> Result<Option<f64>>
where
    C: LagConnection,
    W: Write,
{
    let outcome = fetch_lag(&mut conn, out).await;

    if let Err(e) = conn.close().await {
        warn!("Failed to close connection cleanly: {}", e);
    }

    outcome
}
