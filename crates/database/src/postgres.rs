use crate::error::StoreError;
use crate::store::{Store, call_statement};
use crate::value::{Param, Row, Value};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgArguments, PgColumn, PgConnectOptions, PgConnection, PgPool, PgRow};
use sqlx::query::Query;
use sqlx::{Column, Connection, Postgres, Row as _, TypeInfo};
use std::time::Duration;

/// A `Store` backed by PostgreSQL.
///
/// Depending on configuration it either checks connections out of a bounded
/// pool or opens a dedicated connection for every call and closes it
/// afterwards. Either way the connection is handed back before the result is
/// returned.
#[derive(Debug, Clone)]
pub struct PgStore {
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Pool(PgPool),
    PerCall {
        options: PgConnectOptions,
        timeout: Duration,
    },
}

/// A connection held for the duration of one operation.
enum Lease {
    Pooled(PoolConnection<Postgres>),
    Dedicated(PgConnection),
}

impl Lease {
    fn conn(&mut self) -> &mut PgConnection {
        match self {
            Lease::Pooled(conn) => &mut **conn,
            Lease::Dedicated(conn) => conn,
        }
    }

    async fn release(self) {
        match self {
            // Dropping a pooled connection returns it to the pool.
            Lease::Pooled(conn) => drop(conn),
            Lease::Dedicated(conn) => {
                if let Err(e) = conn.close().await {
                    tracing::warn!(error = %e, "Failed to close database connection cleanly.");
                }
            }
        }
    }
}

impl PgStore {
    pub fn pooled(pool: PgPool) -> Self {
        Self {
            source: Source::Pool(pool),
        }
    }

    pub fn per_call(options: PgConnectOptions, timeout: Duration) -> Self {
        Self {
            source: Source::PerCall { options, timeout },
        }
    }

    async fn acquire(&self) -> Result<Lease, StoreError> {
        let lease = match &self.source {
            Source::Pool(pool) => pool
                .acquire()
                .await
                .map(Lease::Pooled)
                .map_err(StoreError::Connection),
            Source::PerCall { options, timeout } => {
                match tokio::time::timeout(*timeout, PgConnection::connect_with(options)).await {
                    Ok(result) => result.map(Lease::Dedicated).map_err(StoreError::Connection),
                    Err(_) => Err(StoreError::ConnectTimeout(*timeout)),
                }
            }
        };
        if let Err(e) = &lease {
            tracing::error!(error = %e, "Could not acquire a database connection.");
        }
        lease
    }

    /// Applies the embedded reference schema.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        let mut lease = self.acquire().await?;
        let result = sqlx::migrate!("./migrations").run(lease.conn()).await;
        lease.release().await;
        result?;
        Ok(())
    }

    /// Closes the pool, if there is one. Per-call connections are already closed.
    pub async fn close(&self) {
        if let Source::Pool(pool) = &self.source {
            pool.close().await;
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn fetch(&self, query: &str, params: &[Param]) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(query = %compact(query), params = params.len(), "fetch");
        let mut lease = self.acquire().await?;
        let result = bind_params(sqlx::query(query), params)
            .fetch_all(lease.conn())
            .await;
        lease.release().await;

        let rows = result.map_err(StoreError::from_query)?;
        tracing::debug!(rows = rows.len(), "fetch complete");
        rows.iter().map(decode_row).collect()
    }

    async fn call(&self, procedure: &str, params: &[Param]) -> Result<(), StoreError> {
        let statement = call_statement(procedure, params.len())?;
        tracing::debug!(procedure, params = params.len(), "call");
        let mut lease = self.acquire().await?;
        let result = execute_in_transaction(lease.conn(), &statement, params).await;
        lease.release().await;

        if let Err(e) = &result {
            tracing::warn!(procedure, error = %e, "Stored procedure failed.");
        }
        result
    }
}

async fn execute_in_transaction(
    conn: &mut PgConnection,
    statement: &str,
    params: &[Param],
) -> Result<(), StoreError> {
    let mut tx = conn.begin().await.map_err(StoreError::from_query)?;
    match bind_params(sqlx::query(statement), params)
        .execute(&mut *tx)
        .await
    {
        Ok(_) => tx.commit().await.map_err(StoreError::from_query),
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Rollback after failed call did not complete.");
            }
            Err(StoreError::from_query(e))
        }
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Param],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Param::Int(v) => query.bind(*v),
            Param::Decimal(v) => query.bind(*v),
            Param::Text(v) => query.bind(v.as_str()),
        };
    }
    query
}

fn decode_row(row: &PgRow) -> Result<Row, StoreError> {
    row.columns()
        .iter()
        .map(|column| decode_cell(row, column))
        .collect::<Result<Vec<_>, _>>()
        .map(Row::new)
}

fn decode_cell(row: &PgRow, column: &PgColumn) -> Result<Value, StoreError> {
    let index = column.ordinal();
    let type_name = column.type_info().name();
    let value = match type_name {
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map(|v| v.map(|v| Value::Int(v.into()))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map(|v| v.map(|v| Value::Int(v.into()))),
        "INT8" => row.try_get::<Option<i64>, _>(index).map(|v| v.map(Value::Int)),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map(|v| v.map(Value::Decimal)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| v.map(|v| Value::Float(v.into()))),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index).map(|v| v.map(Value::Float)),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .map(|v| v.map(Value::Text)),
        "BOOL" => row.try_get::<Option<bool>, _>(index).map(|v| v.map(Value::Bool)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map(|v| v.map(Value::Date)),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map(|v| v.map(Value::Timestamp)),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map(|v| v.map(|v| Value::Timestamp(v.naive_utc()))),
        other => {
            return Err(StoreError::UnsupportedColumn {
                column: column.name().to_string(),
                type_name: other.to_string(),
            });
        }
    };
    Ok(value.map_err(StoreError::from_query)?.unwrap_or(Value::Null))
}

/// Collapses a multi-line query onto one line for log output.
fn compact(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_joins_query_lines() {
        let query = "
            SELECT m.TITLE
            FROM MOVIE m
        ";
        assert_eq!(compact(query), "SELECT m.TITLE FROM MOVIE m");
    }
}
