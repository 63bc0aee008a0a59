//! Call-stack snapshots attached to [`Error`](super::Error) values.
//!
//! A [`Stack`] is captured once, when the error is built, and never again.
//! Frames are ordered most recent call first and start at the code that
//! called the constructor: the unwinder's own frames, the capture routine and
//! the `errorx` constructors are skipped.

use std::fmt;
use std::slice;

use backtrace::Backtrace;
use serde::{Deserialize, Serialize};

/// Symbol prefix shared by every function in this module tree.
const INTERNAL_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::errorx::");

/// One resolved call-site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Demangled function name, without the symbol hash.
    pub name: String,
    /// Source file, empty when debug info is unavailable.
    pub file: String,
    /// Source line, `0` when debug info is unavailable.
    pub line: u32,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\t{}:{}", self.name, self.file, self.line)
    }
}

/// Ordered call-stack, most recent call first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stack(Vec<Frame>);

impl Stack {
    /// Walks the current call chain.
    ///
    /// The walk stops at the first frame whose symbol cannot be resolved, so
    /// binaries stripped of their symbol table yield an empty stack.
    #[inline(never)]
    pub(crate) fn capture() -> Self {
        let trace = Backtrace::new();
        let mut frames = Vec::new();
        let mut leading = true;

        'walk: for frame in trace.frames() {
            let symbols = frame.symbols();
            if symbols.is_empty() {
                break;
            }
            // Inlined calls show up as several symbols on one physical frame.
            for symbol in symbols {
                let Some(name) = symbol.name() else {
                    break 'walk;
                };
                let name = format!("{name:#}");
                if leading {
                    if is_capture_frame(&name) {
                        continue;
                    }
                    leading = false;
                }
                frames.push(Frame {
                    name,
                    file: symbol
                        .filename()
                        .map(|path| path.display().to_string())
                        .unwrap_or_default(),
                    line: symbol.lineno().unwrap_or(0),
                });
            }
        }

        Self(frames)
    }

    /// Returns the frames as a slice.
    pub fn frames(&self) -> &[Frame] {
        &self.0
    }

    /// Returns an iterator over the frames, most recent first.
    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.0.iter()
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no frame could be resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.0 {
            writeln!(f, "{frame}")?;
        }
        Ok(())
    }
}

/// Frames belonging to the unwinder or to the `errorx` constructors.
fn is_capture_frame(name: &str) -> bool {
    if name.starts_with("backtrace::") || name.starts_with("<backtrace::") {
        return true;
    }
    if name.starts_with("_Unwind") || name.contains("libunwind") {
        return true;
    }
    name.contains(INTERNAL_PREFIX) && !name.contains("::tests::")
}
