//! Suspiciousness scoring and the diagnostic report.

pub mod engine;
pub mod report;
