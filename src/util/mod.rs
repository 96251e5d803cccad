// buslog - util/mod.rs
//
// Utility modules: error types, named constants, diagnostics setup.
// No dependencies on core, app, render, or platform layers.

pub mod constants;
pub mod error;
pub mod logging;
