//! Write targets.
//!
//! A [`Target`] accepts one rendered line at a time and terminates it with a
//! newline. Targets are cheap handles: cloning a custom target shares the
//! underlying writer, so a logger and its scoped children write to the same
//! place.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Erase the previous terminal line: cursor up one row, clear the row.
pub(crate) const ERASE_PREVIOUS_LINE: &[u8] = b"\x1b[1A\x1b[2K";

/// Where rendered lines go.
#[derive(Clone)]
pub enum Target {
    Stdout,
    Stderr,
    Custom(Arc<Mutex<dyn Write + Send>>),
}

impl Target {
    /// Wrap any writer.
    pub fn custom<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Target::Custom(Arc::new(Mutex::new(writer)))
    }

    /// An in-memory target and a handle for reading what was written.
    pub fn buffer() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Target::Custom(buffer.inner.clone()), buffer)
    }

    /// Write `line` followed by a newline, optionally erasing the previous
    /// line first.
    pub fn write_line(&self, line: &str, erase_previous: bool) -> io::Result<()> {
        match self {
            Target::Stdout => emit(&mut io::stdout().lock(), line, erase_previous),
            Target::Stderr => emit(&mut io::stderr().lock(), line, erase_previous),
            Target::Custom(writer) => emit(&mut *writer.lock(), line, erase_previous),
        }
    }
}

fn emit<W: Write + ?Sized>(writer: &mut W, line: &str, erase_previous: bool) -> io::Result<()> {
    if erase_previous {
        writer.write_all(ERASE_PREVIOUS_LINE)?;
    }
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Stdout => f.write_str("Stdout"),
            Target::Stderr => f.write_str("Stderr"),
            Target::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One or more targets written in order.
#[derive(Debug, Clone)]
pub struct StreamSet(Vec<Target>);

impl StreamSet {
    pub fn new(targets: Vec<Target>) -> Self {
        Self(targets)
    }

    pub fn targets(&self) -> &[Target] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Target> for StreamSet {
    fn from(target: Target) -> Self {
        Self(vec![target])
    }
}

impl From<Vec<Target>> for StreamSet {
    fn from(targets: Vec<Target>) -> Self {
        Self(targets)
    }
}

/// In-memory sink shared between a [`Target`] and the caller.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    /// Written lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("len", &self.inner.lock().len())
            .finish()
    }
}
