//! Hash collections with the FxHash hasher.
//!
//! Deterministic and faster than SipHash for the short string keys
//! (class names, signatures, statement ids) used throughout.

pub use rustc_hash::{FxHashMap, FxHashSet};
