//! Append-only store for decoded bytes.
//!
//! One [`RxBuffer`] is shared between the background decode task (the only
//! writer) and any number of readers.  Readers take snapshots, so they are
//! safe against concurrent growth; nothing is ever removed or mutated after
//! being appended.

use std::sync::{Arc, Mutex};

/// Shared, append-only sequence of decoded bytes in arrival order.
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct RxBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl RxBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one decoded byte.
    pub(crate) fn push(&self, byte: u8) {
        self.bytes.lock().unwrap().push(byte);
    }

    /// Snapshot of every byte decoded so far, in arrival order.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.bytes.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The buffer decoded as text, split on carriage returns.
    ///
    /// Each byte maps to its code point.  The `'\r'` delimiters are removed;
    /// a trailing `'\r'` therefore yields a final empty segment, and an
    /// empty buffer yields one empty segment.
    pub fn text_lines(&self) -> Vec<String> {
        let text: String = self
            .bytes
            .lock()
            .unwrap()
            .iter()
            .map(|&b| b as char)
            .collect();
        text.split('\r').map(str::to_owned).collect()
    }
}
