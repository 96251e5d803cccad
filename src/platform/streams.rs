// buslog - platform/streams.rs
//
// Output sinks for the renderers. Real process streams by default; an
// in-memory buffer for embedding hosts that capture output and for tests.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// A writable sink owned by a renderer.
pub type Sink = Box<dyn Write>;

/// Process standard output.
pub fn stdout() -> Sink {
    Box::new(io::stdout())
}

/// Process standard error.
pub fn stderr() -> Sink {
    Box::new(io::stderr())
}

/// Cloneable in-memory sink. Every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Boxed clone suitable for passing to a renderer.
    pub fn sink(&self) -> Sink {
        Box::new(self.clone())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
