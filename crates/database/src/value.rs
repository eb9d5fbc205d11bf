use crate::error::StoreError;
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{AdminFlag, MovieId, Rating, ReviewId, UserId};
use rust_decimal::Decimal;
use std::fmt;

/// A single cell read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Timestamp(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A positional bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<Decimal> for Param {
    fn from(v: Decimal) -> Self {
        Param::Decimal(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<UserId> for Param {
    fn from(v: UserId) -> Self {
        Param::Int(v.get())
    }
}

impl From<MovieId> for Param {
    fn from(v: MovieId) -> Self {
        Param::Int(v.get())
    }
}

impl From<ReviewId> for Param {
    fn from(v: ReviewId) -> Self {
        Param::Int(v.get())
    }
}

impl From<Rating> for Param {
    fn from(v: Rating) -> Self {
        Param::Decimal(v.value())
    }
}

impl From<AdminFlag> for Param {
    fn from(v: AdminFlag) -> Self {
        Param::Text(v.as_str().to_string())
    }
}

/// One result row: the selected columns in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(Vec<Value>);

/// Builds a `Row` from anything convertible into `Value`.
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::Row::new(vec![$($crate::Value::from($value)),*])
    };
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    fn cell(&self, index: usize, expected: &'static str) -> Result<&Value, StoreError> {
        self.0.get(index).ok_or(StoreError::Decode { index, expected })
    }

    pub fn int(&self, index: usize) -> Result<i64, StoreError> {
        self.opt_int(index)?
            .ok_or(StoreError::Decode { index, expected: "integer" })
    }

    pub fn opt_int(&self, index: usize) -> Result<Option<i64>, StoreError> {
        match self.cell(index, "integer")? {
            Value::Null => Ok(None),
            Value::Int(v) => Ok(Some(*v)),
            // NUMERIC key columns with no fractional part are still integers.
            Value::Decimal(v) if v.fract().is_zero() => i64::try_from(*v)
                .map(Some)
                .map_err(|_| StoreError::Decode { index, expected: "integer" }),
            _ => Err(StoreError::Decode { index, expected: "integer" }),
        }
    }

    pub fn text(&self, index: usize) -> Result<&str, StoreError> {
        self.opt_text(index)?
            .ok_or(StoreError::Decode { index, expected: "text" })
    }

    pub fn opt_text(&self, index: usize) -> Result<Option<&str>, StoreError> {
        match self.cell(index, "text")? {
            Value::Null => Ok(None),
            Value::Text(v) => Ok(Some(v.as_str())),
            _ => Err(StoreError::Decode { index, expected: "text" }),
        }
    }

    pub fn decimal(&self, index: usize) -> Result<Decimal, StoreError> {
        self.opt_decimal(index)?
            .ok_or(StoreError::Decode { index, expected: "number" })
    }

    pub fn opt_decimal(&self, index: usize) -> Result<Option<Decimal>, StoreError> {
        match self.cell(index, "number")? {
            Value::Null => Ok(None),
            Value::Decimal(v) => Ok(Some(*v)),
            Value::Int(v) => Ok(Some(Decimal::from(*v))),
            Value::Float(v) => Decimal::try_from(*v)
                .map(Some)
                .map_err(|_| StoreError::Decode { index, expected: "number" }),
            _ => Err(StoreError::Decode { index, expected: "number" }),
        }
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl IntoIterator for Row {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
