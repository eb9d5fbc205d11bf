//! An in-memory `Store` for tests of the layers above the database.
//!
//! Responses are scripted per query text or procedure name. Each scripted
//! response is consumed in order, and the last one keeps being returned, so
//! a list can be scripted as "empty, then one row" around a mutation.
//! Unscripted queries return no rows and unscripted procedures succeed.
//! Every invocation is recorded for later assertions.

use crate::error::StoreError;
use crate::store::{Store, validate_procedure_name};
use crate::value::{Param, Row};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One recorded call against the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Fetch { query: String, params: Vec<Param> },
    Call { procedure: String, params: Vec<Param> },
}

type Scripted<T> = HashMap<String, VecDeque<Result<T, String>>>;

#[derive(Debug, Default)]
pub struct ScriptedStore {
    fetches: Mutex<Scripted<Vec<Row>>>,
    calls: Mutex<Scripted<()>>,
    log: Mutex<Vec<Invocation>>,
    unreachable: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn next<T: Clone>(script: &mut Scripted<T>, key: &str) -> Option<Result<T, String>> {
    let queue = script.get_mut(key)?;
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().cloned()
    }
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that cannot be reached: every operation fails to connect.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_rows(self, query: &str, rows: Vec<Row>) -> Self {
        lock(&self.fetches)
            .entry(query.to_string())
            .or_default()
            .push_back(Ok(rows));
        self
    }

    pub fn with_fetch_error(self, query: &str, message: &str) -> Self {
        lock(&self.fetches)
            .entry(query.to_string())
            .or_default()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn with_call_error(self, procedure: &str, message: &str) -> Self {
        lock(&self.calls)
            .entry(procedure.to_string())
            .or_default()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn with_call_success(self, procedure: &str) -> Self {
        lock(&self.calls)
            .entry(procedure.to_string())
            .or_default()
            .push_back(Ok(()));
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        lock(&self.log).clone()
    }

    /// The procedures called so far, in order.
    pub fn called_procedures(&self) -> Vec<String> {
        lock(&self.log)
            .iter()
            .filter_map(|invocation| match invocation {
                Invocation::Call { procedure, .. } => Some(procedure.clone()),
                Invocation::Fetch { .. } => None,
            })
            .collect()
    }

    /// True when nothing has reached the store yet.
    pub fn is_untouched(&self) -> bool {
        lock(&self.log).is_empty()
    }

    fn unreachable_error() -> StoreError {
        StoreError::Connection(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl Store for ScriptedStore {
    async fn fetch(&self, query: &str, params: &[Param]) -> Result<Vec<Row>, StoreError> {
        lock(&self.log).push(Invocation::Fetch {
            query: query.to_string(),
            params: params.to_vec(),
        });
        if self.unreachable {
            return Err(Self::unreachable_error());
        }
        match next(&mut lock(&self.fetches), query) {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(StoreError::rejected(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn call(&self, procedure: &str, params: &[Param]) -> Result<(), StoreError> {
        validate_procedure_name(procedure)?;
        lock(&self.log).push(Invocation::Call {
            procedure: procedure.to_string(),
            params: params.to_vec(),
        });
        if self.unreachable {
            return Err(Self::unreachable_error());
        }
        match next(&mut lock(&self.calls), procedure) {
            Some(Err(message)) => Err(StoreError::rejected(message)),
            Some(Ok(())) | None => Ok(()),
        }
    }
}
