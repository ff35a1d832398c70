#![allow(dead_code)]

use assert_cmd::Command;
use std::env;

const PG_VARS: [&str; 5] = ["PGHOST", "PGPORT", "PGUSER", "PGPASSWORD", "PGDATABASE"];

/// The checker binary with all libpq-style variables cleared, so the
/// invoking shell cannot leak settings into a test.
pub fn lag_check() -> Command {
    let mut cmd = Command::cargo_bin("pg-lag-check").unwrap();
    for var in PG_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Connection variables for a live server, read from `<prefix>HOST`,
/// `<prefix>PORT` and so on, e.g. `TEST_STANDBY_HOST`.
pub fn server_env(prefix: &str) -> Vec<(&'static str, String)> {
    let get = |suffix: &str, default: &str| {
        env::var(format!("{}{}", prefix, suffix)).unwrap_or_else(|_| default.to_string())
    };

    vec![
        ("PGHOST", get("HOST", "localhost")),
        ("PGPORT", get("PORT", "5432")),
        ("PGUSER", get("USER", "postgres")),
        ("PGPASSWORD", get("PASSWORD", "postgres")),
        ("PGDATABASE", get("DATABASE", "postgres")),
    ]
}

/// Parses the value of the `Replay delay (seconds):` line, if any.
pub fn delay_from_output(stdout: &str) -> Option<f64> {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Replay delay (seconds):"))
        .map(|value| value.trim().parse().unwrap())
}
