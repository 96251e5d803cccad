// buslog - platform/mod.rs
//
// Platform layer: process streams, panic hook, config files and directories.
// Dependencies: standard library, directories crate, core types.

pub mod config;
pub mod panic_hook;
pub mod streams;
