/// Audio container hint forwarded to the speech-to-text provider.
///
/// The provider infers the codec from the uploaded filename, so the hint only
/// ever carries a known extension. Client-declared names are advisory and are
/// never forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatHint {
    extension: &'static str,
}

const KNOWN_FORMATS: [(&str, &str); 10] = [
    ("webm", "audio/webm"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("mpeg", "audio/mpeg"),
    ("mpga", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("mp4", "audio/mp4"),
    ("ogg", "audio/ogg"),
    ("oga", "audio/ogg"),
    ("flac", "audio/flac"),
];

const DEFAULT_EXTENSION: &str = "webm";

impl FormatHint {
    pub fn from_filename(filename: &str) -> Self {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .and_then(|ext| {
                KNOWN_FORMATS
                    .iter()
                    .find(|(known, _)| *known == ext)
                    .map(|(known, _)| *known)
            })
            .unwrap_or(DEFAULT_EXTENSION);

        Self { extension }
    }

    /// Hint from the last path segment of a remote reference.
    pub fn from_url(url: &url::Url) -> Self {
        let last_segment = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        Self::from_filename(last_segment)
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn file_name(&self) -> String {
        format!("audio.{}", self.extension)
    }

    pub fn mime(&self) -> &'static str {
        KNOWN_FORMATS
            .iter()
            .find(|(known, _)| *known == self.extension)
            .map(|(_, mime)| *mime)
            .unwrap_or("application/octet-stream")
    }
}

impl Default for FormatHint {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION,
        }
    }
}
