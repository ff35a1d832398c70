//! Maps the outcome of a check to process behavior.
//!
//! Exit codes:
//!
//! * `0`: replay delay measured
//! * `1`: configuration, connection or query failure
//! * `2`: no replay timestamp (not a standby, or nothing replayed yet)
//!
//! Code `1` is also documented as the future "lag above threshold" result.
//! No threshold comparison exists, so it is never produced for that reason.

use std::io::Write;
use std::process::ExitCode;

use crate::{Error, Result};

pub const NOT_STANDBY_WARNING: &str = "WARN: pg_last_xact_replay_timestamp() is NULL.\n\
     This usually means this server is not a physical standby, \
     or no WAL has been replayed yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Failure,
    NotStandby,
}

impl CheckStatus {
    pub fn code(self) -> u8 {
        match self {
            CheckStatus::Ok => 0,
            CheckStatus::Failure => 1,
            CheckStatus::NotStandby => 2,
        }
    }

    pub fn from_delay(delay: Option<f64>) -> Self {
        match delay {
            Some(_) => CheckStatus::Ok,
            None => CheckStatus::NotStandby,
        }
    }
}

impl From<CheckStatus> for ExitCode {
    fn from(status: CheckStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Writes whatever the outcome requires beyond the reading lines and
/// returns the status to exit with.
///
/// Errors go to `err` as `ERROR: ...`; the not-a-standby warning goes to
/// `out`.
pub fn report<O, E>(outcome: Result<Option<f64>>, out: &mut O, err: &mut E) -> CheckStatus
where
    O: Write,
    E: Write,
{
    match outcome {
        Ok(delay) => {
            let status = CheckStatus::from_delay(delay);
            if status == CheckStatus::NotStandby {
                if let Err(e) = writeln!(out, "{}", NOT_STANDBY_WARNING) {
                    return report_error(&Error::Io(e), err);
                }
            }
            status
        }
        Err(e) => report_error(&e, err),
    }
}

pub fn report_error<E: Write>(error: &Error, err: &mut E) -> CheckStatus {
    // Nothing else to do if stderr itself is gone.
    let _ = writeln!(err, "ERROR: {}", error);
    CheckStatus::Failure
}
