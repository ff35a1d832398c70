use async_trait::async_trait;
use chrono::{DateTime, Local};
use tokio_postgres::NoTls;
use tracing::{debug, error, info};

use crate::lag::{LagConnection, LAG_QUERY};
use crate::postgres::LagRow;
use crate::{Config, Error, Result};

/// A plain (non-replication) session used to read replay status.
///
/// Dropping the handle without calling [`LagConnection::close`] still drops
/// the client, which ends the server session.
pub struct PgConnection {
    client: tokio_postgres::Client,
    connection_task: tokio::task::JoinHandle<()>,
}

impl PgConnection {
    pub async fn connect(config: &Config) -> Result<Self> {
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            user = %config.user,
            "Connecting to PostgreSQL"
        );

        let (client, connection) = config
            .postgres_config()
            .connect(NoTls)
            .await
            .map_err(Error::Connect)?;

        let connection_task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("Connection error: {}", e);
            }
        });

        debug!("Connected to {}", config.connection_summary());

        Ok(Self {
            client,
            connection_task,
        })
    }
}

#[async_trait]
impl LagConnection for PgConnection {
    async fn query_lag(&mut self) -> Result<LagRow> {
        debug!("Running lag query");

        let rows = self.client.query(LAG_QUERY, &[]).await?;
        let row = rows
            .first()
            .ok_or_else(|| Error::Query("lag query returned no rows".to_string()))?;

        let current_time: DateTime<Local> = row.try_get(0)?;
        let replay_time: Option<DateTime<Local>> = row.try_get(1)?;
        let delay_seconds: Option<f64> = row.try_get(2)?;

        Ok(LagRow {
            current_time,
            replay_time,
            delay_seconds,
        })
    }

    async fn close(self) -> Result<()> {
        debug!("Closing PostgreSQL connection");

        // Dropping the client sends Terminate; the connection future then ends.
        drop(self.client);
        self.connection_task
            .await
            .map_err(|e| Error::Task(e.to_string()))
    }
}
