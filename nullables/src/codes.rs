//! Nullable code generator: predictable proof codes.

use campaign_crypto::{CodeError, CodeGenerator};
use std::sync::atomic::{AtomicU32, Ordering};

/// Issues `c0000001`, `c0000002`, ... in order.
pub struct SequenceCodes {
    next: AtomicU32,
}

impl SequenceCodes {
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Number of codes handed out so far.
    pub fn issued(&self) -> u32 {
        self.next.load(Ordering::SeqCst) - 1
    }
}

impl Default for SequenceCodes {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for SequenceCodes {
    fn generate(&self) -> Result<String, CodeError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(format!("c{n:07x}"))
    }
}
