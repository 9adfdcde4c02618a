//! The recorded execution trace: document parsing and point queries.

pub mod document;
pub mod store;
