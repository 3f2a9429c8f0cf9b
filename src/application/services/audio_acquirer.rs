use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{FetchError, RemoteFetcher};
use crate::domain::{AudioSource, FetchAllowList, FormatHint, UntrustedReason};

use super::scoped_audio::{ResourceLedger, ScopedAudio};

/// Where acquired audio is held until transcription finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferMode {
    Memory,
    /// Written to a named temporary file, in `dir` or the system temp dir.
    Spool { dir: Option<PathBuf> },
}

pub struct AudioAcquirer {
    fetcher: Arc<dyn RemoteFetcher>,
    allow_list: FetchAllowList,
    max_bytes: usize,
    buffer_mode: BufferMode,
    ledger: ResourceLedger,
}

impl AudioAcquirer {
    pub fn new(
        fetcher: Arc<dyn RemoteFetcher>,
        allow_list: FetchAllowList,
        max_bytes: usize,
        buffer_mode: BufferMode,
    ) -> Self {
        Self {
            fetcher,
            allow_list,
            max_bytes,
            buffer_mode,
            ledger: ResourceLedger::new(),
        }
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    #[tracing::instrument(skip(self, source), fields(source = source.kind()))]
    pub async fn acquire(&self, source: AudioSource) -> Result<ScopedAudio, AcquireError> {
        let (bytes, format) = match source {
            AudioSource::InlineBytes {
                bytes,
                declared_filename,
            } => {
                let format = declared_filename
                    .as_deref()
                    .map(FormatHint::from_filename)
                    .unwrap_or_default();
                (bytes, format)
            }
            AudioSource::RemoteReference { url } => {
                let url = self.allow_list.check(&url).map_err(|reason| {
                    tracing::warn!(reason = %reason, "Rejected untrusted audio reference");
                    AcquireError::UntrustedSource(reason)
                })?;

                tracing::debug!(host = url.host_str().unwrap_or_default(), "Fetching remote audio");

                let bytes = self
                    .fetcher
                    .fetch(&url, self.max_bytes)
                    .await
                    .map_err(|e| match e {
                        FetchError::TooLarge { limit } => AcquireError::PayloadTooLarge { limit },
                        other => AcquireError::Fetch(other),
                    })?;

                if bytes.is_empty() {
                    return Err(AcquireError::Fetch(FetchError::EmptyBody));
                }

                (bytes, FormatHint::from_url(&url))
            }
        };

        if bytes.is_empty() {
            return Err(AcquireError::EmptyPayload);
        }
        if bytes.len() > self.max_bytes {
            return Err(AcquireError::PayloadTooLarge {
                limit: self.max_bytes,
            });
        }

        let audio = match &self.buffer_mode {
            BufferMode::Memory => ScopedAudio::in_memory(bytes, format, self.ledger.clone()),
            BufferMode::Spool { dir } => {
                let len = bytes.len();
                let file = spool(bytes, dir.clone(), format.extension()).await?;
                ScopedAudio::spooled(file, len, format, self.ledger.clone())
            }
        };

        tracing::debug!(
            bytes = audio.len(),
            format = audio.format_hint().extension(),
            "Audio acquired"
        );

        Ok(audio)
    }
}

async fn spool(
    bytes: Bytes,
    dir: Option<PathBuf>,
    extension: &'static str,
) -> Result<tempfile::NamedTempFile, AcquireError> {
    tokio::task::spawn_blocking(move || {
        let suffix = format!(".{}", extension);
        let mut builder = tempfile::Builder::new();
        builder.prefix("moodscribe-").suffix(&suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(&bytes)?;
        file.flush()?;
        Ok::<_, io::Error>(file)
    })
    .await
    .map_err(|e| AcquireError::Io(io::Error::other(format!("spool task failed: {e}"))))?
    .map_err(AcquireError::Io)
}

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("audio payload is empty")]
    EmptyPayload,
    #[error("audio payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },
    #[error("audio reference is not trusted: {0}")]
    UntrustedSource(UntrustedReason),
    #[error("failed to fetch audio: {0}")]
    Fetch(FetchError),
    #[error("audio buffer i/o failed: {0}")]
    Io(#[from] io::Error),
}
