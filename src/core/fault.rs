// buslog - core/fault.rs
//
// Fatal trigger seam: the source of uncaught faults (a panicking thread on
// the server, a window error in the browser flavour). The logger installs
// exactly one handler per instance, regardless of its configured level.

use crate::core::message::ErrorInfo;
use std::cell::RefCell;

/// An uncaught fault delivered by a fatal trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalSignal {
    /// A process-level uncaught error.
    Uncaught(ErrorInfo),

    /// A window-level error report: message plus the source and line it
    /// was raised from.
    WindowError {
        message: String,
        source: String,
        line: u32,
    },
}

/// What the trigger should do with the fault after the logger has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultDisposition {
    /// Continue with the platform's default fault handling.
    Propagate,

    /// The fault is handled; suppress default surfacing.
    Handled,
}

/// Handler the logger installs on a trigger.
pub type FaultHandler = Box<dyn Fn(&FatalSignal) -> FaultDisposition>;

/// A source of uncaught faults.
pub trait FatalTrigger {
    /// Install the handler. Called once per logger instance.
    fn install(&mut self, handler: FaultHandler);
}

/// Window-style error hook. The host calls [`WindowErrorHook::report`] from
/// its global error surface and suppresses default surfacing when it
/// returns `true`.
#[derive(Default)]
pub struct WindowErrorHook {
    handler: RefCell<Option<FaultHandler>>,
}

impl WindowErrorHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a window error. Returns `true` when the installed handler
    /// marked it handled; `false` when no handler is installed.
    pub fn report(&self, message: &str, source: &str, line: u32) -> bool {
        let signal = FatalSignal::WindowError {
            message: message.to_string(),
            source: source.to_string(),
            line,
        };
        self.handler
            .borrow()
            .as_ref()
            .is_some_and(|handler| handler(&signal) == FaultDisposition::Handled)
    }

    pub fn is_installed(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl FatalTrigger for WindowErrorHook {
    fn install(&mut self, handler: FaultHandler) {
        *self.handler.get_mut() = Some(handler);
    }
}

impl std::fmt::Debug for WindowErrorHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowErrorHook")
            .field("installed", &self.is_installed())
            .finish()
    }
}
