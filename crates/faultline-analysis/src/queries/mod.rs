//! Query identification: classify statements with a pluggable rule
//! set and group them into logical query units.

pub mod identifier;
pub mod rules;
