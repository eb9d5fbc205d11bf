use crate::error::StoreError;
use crate::value::{Param, Row};
use async_trait::async_trait;

/// The two operations every screen is built on.
///
/// Each call is one isolated unit of work: it acquires a connection, runs a
/// single statement, and releases the connection again on every path,
/// including failures. Nothing is retried and no transaction outlives the
/// call.
#[async_trait]
pub trait Store: Send + Sync {
    /// Runs a read query and returns every row. A query that matches nothing
    /// yields an empty vector, never an error.
    async fn fetch(&self, query: &str, params: &[Param]) -> Result<Vec<Row>, StoreError>;

    /// Invokes a stored procedure and commits it. Either the whole procedure
    /// takes effect or, on error, none of it does.
    async fn call(&self, procedure: &str, params: &[Param]) -> Result<(), StoreError>;
}

/// Checks that a procedure name is a plain SQL identifier, so it can be
/// spliced into a `CALL` statement without quoting.
pub fn validate_procedure_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidProcedure(name.to_string()))
    }
}

/// Builds `CALL name($1, ..., $n)` for a procedure taking `arity` arguments.
pub fn call_statement(procedure: &str, arity: usize) -> Result<String, StoreError> {
    validate_procedure_name(procedure)?;
    let placeholders = (1..=arity)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("CALL {procedure}({placeholders})"))
}
