use bytes::Bytes;

/// Where the audio for one transcription request comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    InlineBytes {
        bytes: Bytes,
        declared_filename: Option<String>,
    },
    RemoteReference {
        url: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AudioSourceError {
    #[error("either an audio file or an audioUrl must be provided")]
    Missing,
    #[error("provide either an audio file or an audioUrl, not both")]
    Ambiguous,
}

impl AudioSource {
    /// Builds a source from the optional request fields; exactly one must be present.
    ///
    /// A blank `audio_url` counts as absent.
    pub fn from_parts(
        inline: Option<(Bytes, Option<String>)>,
        audio_url: Option<String>,
    ) -> Result<Self, AudioSourceError> {
        let audio_url = audio_url.filter(|u| !u.trim().is_empty());

        match (inline, audio_url) {
            (Some((bytes, declared_filename)), None) => Ok(Self::InlineBytes {
                bytes,
                declared_filename,
            }),
            (None, Some(url)) => Ok(Self::RemoteReference {
                url: url.trim().to_string(),
            }),
            (None, None) => Err(AudioSourceError::Missing),
            (Some(_), Some(_)) => Err(AudioSourceError::Ambiguous),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InlineBytes { .. } => "inline",
            Self::RemoteReference { .. } => "remote",
        }
    }
}
