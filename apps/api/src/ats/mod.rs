//! ATS score engine: deterministic, rule-based résumé scoring.
//! Pure functions only. No I/O, no shared state, safe to call from any task.

pub mod engine;
pub mod keywords;
pub mod report;

pub use engine::compute_score;
pub use report::ScoreReport;
