use url::Url;

/// Hosts the service is allowed to download audio from.
///
/// A pattern such as `storage.example.com` matches that host exactly, while
/// `.example.com` (or `*.example.com`) matches any subdomain but not the apex.
/// Matching ignores ASCII case. An empty list trusts nothing.
#[derive(Debug, Clone, Default)]
pub struct FetchAllowList {
    patterns: Vec<String>,
    allow_insecure_http: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UntrustedReason {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("scheme not allowed: {0}")]
    SchemeNotAllowed(String),
    #[error("credentials in url are not allowed")]
    EmbeddedCredentials,
    #[error("url has no host")]
    MissingHost,
    #[error("host not allowed: {0}")]
    HostNotAllowed(String),
}

impl FetchAllowList {
    pub fn new<I, S>(patterns: I, allow_insecure_http: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| normalize_pattern(p.as_ref()))
            .filter(|p| !p.is_empty() && p != ".")
            .collect();

        Self {
            patterns,
            allow_insecure_http,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Parses `raw` and returns the URL only if every trust rule passes.
    pub fn check(&self, raw: &str) -> Result<Url, UntrustedReason> {
        let url = Url::parse(raw).map_err(|e| UntrustedReason::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "https" => {}
            "http" if self.allow_insecure_http => {}
            other => return Err(UntrustedReason::SchemeNotAllowed(other.to_string())),
        }

        if !url.username().is_empty() || url.password().is_some() {
            return Err(UntrustedReason::EmbeddedCredentials);
        }

        let host = url
            .host_str()
            .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .ok_or(UntrustedReason::MissingHost)?;

        if self.permits_host(&host) {
            Ok(url)
        } else {
            Err(UntrustedReason::HostNotAllowed(host))
        }
    }

    fn permits_host(&self, host: &str) -> bool {
        self.patterns.iter().any(|pattern| {
            if pattern.starts_with('.') {
                host.ends_with(pattern.as_str())
            } else {
                host == pattern
            }
        })
    }
}

fn normalize_pattern(pattern: &str) -> String {
    let pattern = pattern.trim().trim_end_matches('.').to_ascii_lowercase();
    match pattern.strip_prefix("*.") {
        Some(rest) => format!(".{}", rest),
        None => pattern,
    }
}
