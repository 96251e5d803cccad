// buslog - platform/panic_hook.rs
//
// Process-wide fatal trigger for the server flavour. A panic on the thread
// that installed the logger is written at FATAL, then the previously
// installed panic hook runs so the fault still surfaces as usual.
//
// The logger is single-threaded, so the handler lives in a thread-local
// slot; panics on other threads only reach the previous hook.

use crate::core::fault::{FatalSignal, FatalTrigger, FaultHandler};
use crate::core::message::ErrorInfo;
use std::any::Any;
use std::cell::RefCell;
use std::panic;
use std::sync::Once;

thread_local! {
    static HANDLER: RefCell<Option<FaultHandler>> = const { RefCell::new(None) };
}

static CHAIN_HOOK: Once = Once::new();

/// Fatal trigger backed by the process panic hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicHook;

impl PanicHook {
    pub fn new() -> Self {
        Self
    }
}

impl FatalTrigger for PanicHook {
    fn install(&mut self, handler: FaultHandler) {
        HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));

        CHAIN_HOOK.call_once(|| {
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
                let signal = FatalSignal::Uncaught(panic_error(info.payload(), location));

                // A panic raised while the handler itself is running finds the
                // slot borrowed and skips straight to the previous hook.
                let _ = HANDLER.try_with(|slot| {
                    if let Ok(handler) = slot.try_borrow() {
                        if let Some(handler) = handler.as_ref() {
                            handler(&signal);
                        }
                    }
                });

                previous(info);
            }));
            tracing::debug!("Panic hook chained for fatal logging");
        });
    }
}

/// Describe a panic as an error value named `Panic`.
fn panic_error(payload: &(dyn Any + Send), location: Option<String>) -> ErrorInfo {
    let message = if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    let info = ErrorInfo::new("Panic", message);
    match location {
        Some(location) => {
            let stack = format!("{}\n    at {location}", info.header());
            info.with_stack(stack)
        }
        None => info,
    }
}
