use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as sent by the API.
///
/// Older tables use integer keys, newer ones use UUID strings, so both are
/// accepted and round-tripped unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiId::Number(n) => write!(f, "{}", n),
            ApiId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ApiId {
    fn from(value: i64) -> Self {
        ApiId::Number(value)
    }
}

impl From<&str> for ApiId {
    fn from(value: &str) -> Self {
        ApiId::Text(value.to_string())
    }
}

impl From<String> for ApiId {
    fn from(value: String) -> Self {
        ApiId::Text(value)
    }
}
