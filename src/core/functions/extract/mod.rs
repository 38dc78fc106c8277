// src/core/functions/extract/mod.rs

//! The typed scalar extractors: `BOOL`, `INTEGER`, ..., `LAX_BOOL`, ... and their
//! `_ARRAY` forms. One struct per mode serves every target; the function name picks it.

pub mod lax;
pub mod strict;

pub use lax::LaxExtract;
pub use strict::StrictExtract;

use crate::core::convert::ScalarTarget;

/// What an extractor name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorKind {
    pub lax: bool,
    pub array: bool,
    pub target: ScalarTarget,
}

impl ExtractorKind {
    /// Resolves a lowercase function name such as `lax_double_array`.
    pub fn resolve(name: &str) -> Option<Self> {
        let (lax, rest) = match name.strip_prefix("lax_") {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        let (array, base) = match rest.strip_suffix("_array") {
            Some(base) => (true, base),
            None => (false, rest),
        };
        let target = match base {
            "bool" => ScalarTarget::Bool,
            "integer" => ScalarTarget::Integer,
            "bigint" => ScalarTarget::BigInt,
            "uinteger" => ScalarTarget::UInteger,
            "ubigint" => ScalarTarget::UBigInt,
            "float" => ScalarTarget::Float,
            "double" => ScalarTarget::Double,
            "varchar" | "string" => ScalarTarget::Varchar,
            _ => return None,
        };
        Some(Self { lax, array, target })
    }

    /// The canonical lowercase name, e.g. `lax_string_array`.
    pub fn name(&self) -> String {
        let base = match self.target {
            ScalarTarget::Varchar if self.lax => "string".to_string(),
            target => target.to_string().to_ascii_lowercase(),
        };
        let prefix = if self.lax { "lax_" } else { "" };
        let suffix = if self.array { "_array" } else { "" };
        format!("{prefix}{base}{suffix}")
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.target, ScalarTarget::Float | ScalarTarget::Double)
    }
}
