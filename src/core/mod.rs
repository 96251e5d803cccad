// buslog - core/mod.rs
//
// Core layer: levels, messages, event payloads, subscription planning.
// Dependencies: standard library, serde for payload decoding.
// Must NOT depend on: app, render, platform, or any I/O.

pub mod duration;
pub mod event;
pub mod fault;
pub mod level;
pub mod message;
pub mod planner;
pub mod settings;
