//! Synchronous PostgreSQL collaborator using [`postgres`].
//!
//! Implemented for [`postgres::Client`] and [`postgres::Transaction`], so a
//! bulk insert can run inside a transaction the caller controls.
//!
//! ```no_run
//! use bulk_insert_core::BulkInsert;
//! use bulk_insert_core::driver::PostgresValue;
//!
//! let mut client = ::postgres::Client::connect("host=localhost user=postgres", ::postgres::NoTls)?;
//! let insert = BulkInsert::new("INSERT INTO users (id, name) VALUES <values>", ["int4", ""])?;
//!
//! let rows: Vec<Vec<PostgresValue>> = (0..100_000)
//!     .map(|i| vec![Box::new(i) as PostgresValue, Box::new(format!("user {i}"))])
//!     .collect();
//!
//! let mut tx = client.transaction()?;
//! let result = insert.execute(&mut tx, &rows)?;
//! tx.commit()?;
//! assert_eq!(result.rows_affected(), 100_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use ::postgres::types::ToSql;
use ::postgres::{Client, Error, GenericClient, Transaction};

use super::{POSTGRES_MAX_BIND_VARS, PostgresValue};
use crate::connection::{Connection, Statement};
use crate::result::BatchResult;

/// Statement prepared on a postgres client, closed on the server when dropped.
pub struct PostgresStatement<'c, C> {
    client: &'c mut C,
    statement: ::postgres::Statement,
}

impl<C: GenericClient> Statement for PostgresStatement<'_, C> {
    type Value = PostgresValue;
    type Error = Error;

    fn execute(&mut self, args: &[&PostgresValue]) -> Result<BatchResult, Error> {
        let params: Vec<&(dyn ToSql + Sync)> = args.iter().map(|value| &***value).collect();
        let rows = self.client.execute(&self.statement, &params)?;
        Ok(BatchResult::new(rows, None))
    }
}

macro_rules! impl_postgres_connection {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Connection for $ty {
                type Value = PostgresValue;
                type Error = Error;
                type Statement<'c>
                    = PostgresStatement<'c, Self>
                where
                    Self: 'c;

                const MAX_BIND_VARS: usize = POSTGRES_MAX_BIND_VARS;

                fn prepare(&mut self, sql: &str) -> Result<PostgresStatement<'_, Self>, Error> {
                    let statement = GenericClient::prepare(self, sql)?;
                    Ok(PostgresStatement {
                        client: self,
                        statement,
                    })
                }
            }
        )+
    };
}

impl_postgres_connection!(Client, Transaction<'_>);
