//! Lookup tables for categorical parameters.
//!
//! Matching is case-insensitive against a fixed tag list. A table that declares
//! a fallback maps unknown tokens onto it (or rejects them under
//! [`CategoryPolicy::Strict`]); a table without a fallback is a model selector
//! and always rejects unknown tokens.

use crate::error::{CalcError, CalcResult};
use serde::Serialize;
use tracing::warn;

/// How unrecognized tokens are handled for tables that declare a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// Substitute the table's fallback tag and log a warning.
    #[default]
    Lenient,
    /// Fail with a parse error.
    Strict,
}

#[derive(Debug, Serialize)]
pub struct CategoryTable {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<&'static str>,
}

impl CategoryTable {
    pub fn lookup(&self, token: &str) -> Option<&'static str> {
        let token = token.trim();
        self.tags.iter().copied().find(|tag| tag.eq_ignore_ascii_case(token))
    }

    /// Resolves a raw token to its canonical tag.
    pub fn resolve(
        &self,
        parameter: &str,
        token: &str,
        policy: CategoryPolicy,
    ) -> CalcResult<&'static str> {
        if let Some(tag) = self.lookup(token) {
            return Ok(tag);
        }

        match (self.fallback, policy) {
            (None, _) => Err(CalcError::ModelSelection {
                parameter: parameter.to_string(),
                value: token.to_string(),
                options: self.tags.iter().map(|tag| tag.to_string()).collect(),
            }),
            (Some(_), CategoryPolicy::Strict) => Err(CalcError::parse(
                parameter,
                token,
                format!("one of {}", self.tags.join(", ")),
            )),
            (Some(fallback), CategoryPolicy::Lenient) => {
                warn!(
                    parameter,
                    token,
                    fallback,
                    table = self.name,
                    "unrecognized category token, using fallback"
                );
                Ok(fallback)
            }
        }
    }
}

/// A typed view over a category table.
///
/// `from_tag` receives canonical tags only, so every tag listed in `TABLE`
/// must map to a variant.
pub trait Category: Copy + Sized + 'static {
    const TABLE: &'static CategoryTable;

    fn from_tag(tag: &str) -> Option<Self>;
}
