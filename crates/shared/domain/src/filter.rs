//! Record list filters.
//!
//! Turns admin list query parameters into a backend filter expression.
//! `filter` is passed through verbatim, `sort` becomes the sort expression
//! and any other `key=value` pair becomes an equality clause.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{DomainError, DomainResult};

/// Reserved parameter carrying a raw filter expression
const PARAM_FILTER: &str = "filter";

/// Reserved parameter carrying a sort expression
const PARAM_SORT: &str = "sort";

static FIELD_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").expect("valid field name pattern"));

/// Filter and sort for a record list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    raw: Option<String>,
    clauses: Vec<String>,
    sort: Option<String>,
}

impl RecordFilter {
    /// Build a filter from query parameters, preserving their order.
    pub fn from_params<I, K, V>(params: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            if value.is_empty() {
                continue;
            }

            match key {
                PARAM_FILTER => filter.raw = Some(value.to_string()),
                PARAM_SORT => filter.sort = Some(value.to_string()),
                field => {
                    if !FIELD_NAME.is_match(field) {
                        return Err(DomainError::validation(format!(
                            "Invalid filter field: {field}"
                        )));
                    }
                    filter
                        .clauses
                        .push(format!("{field}=\"{}\"", escape(value)));
                }
            }
        }

        Ok(filter)
    }

    /// Combined filter expression, if any condition was given.
    pub fn expression(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(self.clauses.len() + 1);
        if let Some(raw) = &self.raw {
            if self.clauses.is_empty() {
                parts.push(raw.clone());
            } else {
                parts.push(format!("({raw})"));
            }
        }
        parts.extend(self.clauses.iter().cloned());

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" && "))
        }
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_none() && self.clauses.is_empty() && self.sort.is_none()
    }
}

/// Escape a value for use inside a double-quoted filter literal.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
