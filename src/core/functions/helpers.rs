// src/core/functions/helpers.rs

//! Provides helper functions for parsing function arguments from `SqlArg`s.
//! These helpers reduce boilerplate and ensure consistent error handling across functions.

use crate::core::SpinelJsonError;
use crate::core::context::ExecutionContext;
use crate::core::convert::to_json;
use crate::core::sql::{SqlArg, SqlValue};
use crate::core::value::{JsonValue, WideNumberMode};

/// A function's arguments split into positional values and `name => value` pairs.
#[derive(Debug)]
pub struct ArgList<'a> {
    /// Uppercase function name for error messages.
    function: String,
    pub positional: Vec<&'a SqlValue>,
    named: Vec<(String, &'a SqlValue)>,
}

/// Splits `args`, rejecting positional arguments after named ones, names outside
/// `allowed` and repeated names. Names match case-insensitively.
pub fn split_args<'a>(
    function: &str,
    args: &'a [SqlArg],
    allowed: &[&str],
) -> Result<ArgList<'a>, SpinelJsonError> {
    let function = function.to_uppercase();
    let mut positional = Vec::new();
    let mut named: Vec<(String, &SqlValue)> = Vec::new();
    for arg in args {
        match &arg.name {
            None if !named.is_empty() => {
                return Err(SpinelJsonError::InvalidArgument(format!(
                    "positional argument follows named arguments in {function}"
                )));
            }
            None => positional.push(&arg.value),
            Some(name) => {
                let key = name.to_ascii_lowercase();
                if !allowed.contains(&key.as_str()) {
                    return Err(SpinelJsonError::InvalidArgument(format!(
                        "unknown named argument '{name}' for {function}"
                    )));
                }
                if named.iter().any(|(n, _)| *n == key) {
                    return Err(SpinelJsonError::InvalidArgument(format!(
                        "named argument '{name}' given more than once"
                    )));
                }
                named.push((key, &arg.value));
            }
        }
    }
    Ok(ArgList {
        function,
        positional,
        named,
    })
}

impl<'a> ArgList<'a> {
    /// Fails with `WrongArgumentCount` unless `min..=max` positional arguments were given.
    pub fn expect_count(&self, min: usize, max: usize) -> Result<(), SpinelJsonError> {
        if (min..=max).contains(&self.positional.len()) {
            Ok(())
        } else {
            Err(SpinelJsonError::WrongArgumentCount(self.function.clone()))
        }
    }

    pub fn get(&self, index: usize) -> Option<&'a SqlValue> {
        self.positional.get(index).copied()
    }

    fn named(&self, name: &str) -> Option<&'a SqlValue> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// A boolean named argument; absent or `NULL` means `default`.
    pub fn flag(&self, name: &str, default: bool) -> Result<bool, SpinelJsonError> {
        match self.named(name) {
            None | Some(SqlValue::Null) => Ok(default),
            Some(SqlValue::Bool(b)) => Ok(*b),
            Some(other) => Err(SpinelJsonError::WrongType(format!(
                "argument '{name}' of {} must be BOOL, got {}",
                self.function,
                other.sql_type()
            ))),
        }
    }

    /// The `wide_number_mode` argument; absent or `NULL` means `default`.
    pub fn wide_mode(
        &self,
        name: &str,
        default: WideNumberMode,
    ) -> Result<WideNumberMode, SpinelJsonError> {
        match self.named(name) {
            None | Some(SqlValue::Null) => Ok(default),
            Some(SqlValue::Varchar(s)) => s.parse().map_err(|_| {
                SpinelJsonError::InvalidArgument(format!(
                    "{name} must be 'exact' or 'round', got '{s}'"
                ))
            }),
            Some(other) => Err(SpinelJsonError::WrongType(format!(
                "argument '{name}' must be VARCHAR, got {}",
                other.sql_type()
            ))),
        }
    }
}

/// Extracts a JSON argument. `NULL` is `None`; any other SQL type is `WrongType`.
pub fn extract_json(
    value: &SqlValue,
    function: &str,
) -> Result<Option<JsonValue>, SpinelJsonError> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Json(j) => Ok(Some(j.clone())),
        other => Err(SpinelJsonError::WrongType(format!(
            "{} expects a JSON argument, got {}",
            function.to_uppercase(),
            other.sql_type()
        ))),
    }
}

/// Extracts a VARCHAR argument (such as a path). `NULL` is `None`.
pub fn extract_text(value: &SqlValue, function: &str) -> Result<Option<String>, SpinelJsonError> {
    match value {
        SqlValue::Null => Ok(None),
        SqlValue::Varchar(s) => Ok(Some(s.clone())),
        other => Err(SpinelJsonError::WrongType(format!(
            "{} expects a VARCHAR argument, got {}",
            function.to_uppercase(),
            other.sql_type()
        ))),
    }
}

/// An optional path argument that defaults to `$` when omitted.
pub fn extract_path_or_root(
    value: Option<&SqlValue>,
    function: &str,
) -> Result<Option<String>, SpinelJsonError> {
    match value {
        Some(value) => extract_text(value, function),
        None => Ok(Some("$".to_string())),
    }
}

/// The JSON input of the query and value families, which also accept JSON text.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonInput {
    Json(JsonValue),
    /// Parsed lazily at execution; invalid text produces SQL `NULL`.
    Text(String),
    Null,
}

impl JsonInput {
    pub fn from_arg(value: &SqlValue, function: &str) -> Result<Self, SpinelJsonError> {
        match value {
            SqlValue::Null => Ok(JsonInput::Null),
            SqlValue::Json(j) => Ok(JsonInput::Json(j.clone())),
            SqlValue::Varchar(s) => Ok(JsonInput::Text(s.clone())),
            other => Err(SpinelJsonError::WrongType(format!(
                "{} expects JSON or VARCHAR, got {}",
                function.to_uppercase(),
                other.sql_type()
            ))),
        }
    }

    /// The document to query, or `None` for `NULL` input and unparsable text.
    /// Text keeps wide numbers verbatim.
    pub fn resolve(&self, ctx: &ExecutionContext<'_>) -> Option<JsonValue> {
        match self {
            JsonInput::Null => None,
            JsonInput::Json(j) => Some(j.clone()),
            JsonInput::Text(text) => crate::core::value::parse(text, &ctx.parse_options(None)).ok(),
        }
    }

    /// Renders a result in the input's own representation: JSON for JSON, text for text.
    pub fn render(&self, value: &JsonValue) -> SqlValue {
        match self {
            JsonInput::Text(_) => SqlValue::Varchar(value.to_string()),
            _ => SqlValue::Json(value.clone()),
        }
    }
}

/// Splits `path, value` pairs following the JSON argument of a mutation function.
pub fn parse_path_value_pairs(
    function: &str,
    rest: &[&SqlValue],
) -> Result<Vec<(Option<String>, SqlValue)>, SpinelJsonError> {
    if rest.is_empty() || rest.len() % 2 != 0 {
        return Err(SpinelJsonError::WrongArgumentCount(function.to_uppercase()));
    }
    rest.chunks_exact(2)
        .map(|pair| Ok((extract_text(pair[0], function)?, pair[1].clone())))
        .collect()
}

/// The JSON values one mutation argument contributes. With `each_element`, a SQL array
/// contributes its elements one by one.
pub fn edit_values(value: &SqlValue, each_element: bool) -> Vec<JsonValue> {
    match value {
        SqlValue::Array(items) if each_element => {
            items.iter().map(|item| to_json(item, false)).collect()
        }
        other => vec![to_json(other, false)],
    }
}
