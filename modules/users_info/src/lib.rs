// === PUBLIC CONTRACT ===
// Pure models and the sentinel replies other crates consume
pub mod contract;

pub use contract::model;

// === INTERNAL MODULES ===
// Exposed for wiring in the server binary and for tests.
pub mod api;
pub mod domain;
pub mod infra;
