use chrono::{DateTime, Local};

use crate::{Error, Result};

/// The three columns returned by the lag query, as decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LagRow {
    pub current_time: DateTime<Local>,
    pub replay_time: Option<DateTime<Local>>,
    pub delay_seconds: Option<f64>,
}

/// Replay position of a standby relative to its own clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Replay {
    pub replay_time: DateTime<Local>,
    pub delay_seconds: f64,
}

/// One lag measurement. `replay` is `None` when the server is not a
/// physical standby or has not replayed any WAL since startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagReading {
    pub current_time: DateTime<Local>,
    pub replay: Option<Replay>,
}

impl LagReading {
    pub fn delay_seconds(&self) -> Option<f64> {
        self.replay.map(|r| r.delay_seconds)
    }

    pub fn replay_time(&self) -> Option<DateTime<Local>> {
        self.replay.map(|r| r.replay_time)
    }
}

impl TryFrom<LagRow> for LagReading {
    type Error = Error;

    fn try_from(row: LagRow) -> Result<Self> {
        let replay = match (row.replay_time, row.delay_seconds) {
            (Some(replay_time), Some(delay_seconds)) => Some(Replay {
                replay_time,
                delay_seconds,
            }),
            (None, None) => None,
            (replay_time, delay_seconds) => {
                return Err(Error::Query(format!(
                    "inconsistent lag row: replay_time={:?}, delay_seconds={:?}",
                    replay_time, delay_seconds
                )))
            }
        };

        Ok(Self {
            current_time: row.current_time,
            replay,
        })
    }
}
