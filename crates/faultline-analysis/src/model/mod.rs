//! The static program model: classes, methods, statements, queries.

pub mod builder;
pub mod program;
pub mod types;
