// src/core/mod.rs

//! The central module containing the JSON document engine and the SQL function layer built on it.

pub mod context;
pub mod convert;
pub mod engine;
pub mod errors;
pub mod functions;
pub mod mutation;
pub mod path;
pub mod sql;
pub mod value;

pub use engine::Engine;
pub use errors::SpinelJsonError;
pub use sql::{SqlArg, SqlValue};
pub use value::JsonValue;
