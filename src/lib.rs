// buslog - lib.rs
//
// Library entry point. The `buslog` binary in `main.rs` is a thin replay
// front-end over this surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod render;
pub mod util;

pub use app::bus::{EventBus, LocalEventBus};
pub use app::logger::Logger;
pub use core::level::Level;
pub use core::message::{ErrorInfo, LogMessage};
pub use core::settings::{Environment, LoggerSettings};
