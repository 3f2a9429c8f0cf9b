use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use tempfile::NamedTempFile;

use crate::domain::FormatHint;

/// Counts acquisitions and releases of audio buffers.
///
/// Shared by every handle an acquirer hands out; `outstanding()` is zero once
/// every in-flight request has finished with its audio.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    counts: Arc<LedgerCounts>,
}

#[derive(Debug, Default)]
struct LedgerCounts {
    acquired: AtomicU64,
    released: AtomicU64,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquired(&self) -> u64 {
        self.counts.acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u64 {
        self.counts.released.load(Ordering::SeqCst)
    }

    pub fn outstanding(&self) -> u64 {
        self.acquired().saturating_sub(self.released())
    }

    fn record_acquire(&self) {
        self.counts.acquired.fetch_add(1, Ordering::SeqCst);
    }

    fn record_release(&self) {
        self.counts.released.fetch_add(1, Ordering::SeqCst);
    }
}

enum Storage {
    Memory(Bytes),
    Spooled(NamedTempFile),
}

/// Audio owned by a single request.
///
/// The buffer (or temporary file) is released exactly once: on `release`, or
/// when the handle is dropped on an early return, an error path or a
/// cancelled request.
pub struct ScopedAudio {
    storage: Option<Storage>,
    len: usize,
    format: FormatHint,
    ledger: ResourceLedger,
}

impl ScopedAudio {
    pub(crate) fn in_memory(bytes: Bytes, format: FormatHint, ledger: ResourceLedger) -> Self {
        ledger.record_acquire();
        Self {
            len: bytes.len(),
            storage: Some(Storage::Memory(bytes)),
            format,
            ledger,
        }
    }

    pub(crate) fn spooled(
        file: NamedTempFile,
        len: usize,
        format: FormatHint,
        ledger: ResourceLedger,
    ) -> Self {
        ledger.record_acquire();
        Self {
            storage: Some(Storage::Spooled(file)),
            len,
            format,
            ledger,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn format_hint(&self) -> &FormatHint {
        &self.format
    }

    pub fn is_released(&self) -> bool {
        self.storage.is_none()
    }

    /// Location of the temporary file when the audio was spooled to disk.
    pub fn spool_path(&self) -> Option<&Path> {
        match &self.storage {
            Some(Storage::Spooled(file)) => Some(file.path()),
            _ => None,
        }
    }

    pub async fn read(&self) -> io::Result<Bytes> {
        match &self.storage {
            Some(Storage::Memory(bytes)) => Ok(bytes.clone()),
            Some(Storage::Spooled(file)) => {
                let data = tokio::fs::read(file.path()).await?;
                Ok(Bytes::from(data))
            }
            None => Err(io::Error::other("audio buffer already released")),
        }
    }

    pub fn release(mut self) {
        self.release_storage();
    }

    fn release_storage(&mut self) {
        let Some(storage) = self.storage.take() else {
            return;
        };

        // Unlinked synchronously: the file is gone once release or drop returns.
        if let Storage::Spooled(file) = storage {
            let path = file.path().to_path_buf();
            if let Err(e) = file.close() {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove spooled audio");
            }
        }

        self.ledger.record_release();
        tracing::debug!(bytes = self.len, "Audio buffer released");
    }
}

impl Drop for ScopedAudio {
    fn drop(&mut self) {
        self.release_storage();
    }
}

impl std::fmt::Debug for ScopedAudio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedAudio")
            .field("len", &self.len)
            .field("format", &self.format)
            .field("spooled", &self.spool_path().is_some())
            .field("released", &self.is_released())
            .finish()
    }
}
