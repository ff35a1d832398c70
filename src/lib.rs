pub mod config;
pub mod error;
pub mod lag;
pub mod report;

pub mod postgres;

pub use config::Config;
pub use error::{Error, Result};
pub use lag::{measure, LagConnection};
pub use report::CheckStatus;
