// buslog - app/mod.rs
//
// Application layer: the logger facade, bus wiring, locator, script replay.
// Dependencies: core, render.

pub mod bus;
pub mod locator;
pub mod logger;
pub mod replay;
