//! Async PostgreSQL collaborator using [`tokio_postgres`].
//!
//! Batches are awaited one after the other on the calling task; the insert
//! never has more than one statement in flight.
//!
//! ```no_run
//! use bulk_insert_core::BulkInsert;
//! use bulk_insert_core::driver::PostgresValue;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let (mut client, connection) =
//!     tokio_postgres::connect("host=localhost user=postgres", tokio_postgres::NoTls).await?;
//! tokio::spawn(connection);
//!
//! let insert = BulkInsert::new("INSERT INTO tags (name) VALUES <values>", ["text"])?;
//! let rows: Vec<[PostgresValue; 1]> = ["red", "green", "blue"]
//!     .into_iter()
//!     .map(|name| [Box::new(name) as PostgresValue])
//!     .collect();
//!
//! let result = insert.execute_async(&mut client, &rows).await?;
//! assert_eq!(result.rows_affected(), 3);
//! # Ok(())
//! # }
//! ```

use ::tokio_postgres::types::ToSql;
use ::tokio_postgres::{Client, Error, GenericClient, Transaction};

use super::{POSTGRES_MAX_BIND_VARS, PostgresValue};
use crate::connection::{AsyncConnection, AsyncStatement};
use crate::result::BatchResult;

/// Statement prepared on a tokio-postgres client, closed on the server when dropped.
pub struct TokioPostgresStatement<'c, C> {
    client: &'c C,
    statement: ::tokio_postgres::Statement,
}

impl<C: GenericClient + Sync> AsyncStatement for TokioPostgresStatement<'_, C> {
    type Value = PostgresValue;
    type Error = Error;

    async fn execute(&mut self, args: &[&PostgresValue]) -> Result<BatchResult, Error> {
        let params: Vec<&(dyn ToSql + Sync)> = args.iter().map(|value| &***value).collect();
        let rows = self.client.execute(&self.statement, &params).await?;
        Ok(BatchResult::new(rows, None))
    }
}

macro_rules! impl_tokio_postgres_connection {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl AsyncConnection for $ty {
                type Value = PostgresValue;
                type Error = Error;
                type Statement<'c>
                    = TokioPostgresStatement<'c, Self>
                where
                    Self: 'c;

                const MAX_BIND_VARS: usize = POSTGRES_MAX_BIND_VARS;

                async fn prepare(
                    &mut self,
                    sql: &str,
                ) -> Result<TokioPostgresStatement<'_, Self>, Error> {
                    let client: &Self = self;
                    let statement = GenericClient::prepare(client, sql).await?;
                    Ok(TokioPostgresStatement { client, statement })
                }
            }
        )+
    };
}

impl_tokio_postgres_connection!(Client, Transaction<'_>);
