use std::io::Read;

use base64::{
    Engine as _,
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};

use crate::foundation::{config::FetchConfig, error::FetchError};

// Payloads produced by browsers and editors are not always padded.
const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Kind of image reference, decided by its scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// `data:` URI (RFC 2397).
    DataUri,
    /// `http://` or `https://` URL.
    Remote,
    /// Anything else (file paths, `ftp:`, blank strings, ...).
    Unsupported,
}

/// Classify an image `src` by scheme (case-insensitive).
pub fn source_kind(src: &str) -> SourceKind {
    let head: String = src
        .trim_start()
        .chars()
        .take(8)
        .collect::<String>()
        .to_ascii_lowercase();
    if head.starts_with("data:") {
        SourceKind::DataUri
    } else if head.starts_with("http://") || head.starts_with("https://") {
        SourceKind::Remote
    } else {
        SourceKind::Unsupported
    }
}

/// Resolves image references (`data:` URIs and `http(s)` URLs) into raw bytes.
///
/// Every call is independent: there is no cache and no retry. Remote requests are bounded by
/// [`FetchConfig::timeout`] and [`FetchConfig::max_bytes`].
#[derive(Clone, Debug)]
pub struct ImageFetcher {
    agent: ureq::Agent,
    max_bytes: u64,
}

impl ImageFetcher {
    /// Build a fetcher from config.
    pub fn new(config: &FetchConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            max_bytes: config.max_bytes,
        }
    }

    /// Resolve `src` into raw (still encoded) image bytes.
    pub fn fetch(&self, src: &str) -> Result<Vec<u8>, FetchError> {
        match source_kind(src) {
            SourceKind::DataUri => decode_data_uri(src.trim()),
            SourceKind::Remote => self.fetch_remote(src.trim()),
            SourceKind::Unsupported => Err(FetchError::UnsupportedScheme(truncate_for_log(src))),
        }
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            Err(ureq::Error::Transport(t)) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: t.to_string(),
                });
            }
        };

        let mut body = Vec::new();
        response
            .into_reader()
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut body)?;
        if body.len() as u64 > self.max_bytes {
            return Err(FetchError::TooLarge {
                url: url.to_string(),
                limit: self.max_bytes,
            });
        }

        tracing::debug!(url, bytes = body.len(), "fetched remote image");
        Ok(body)
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

/// Resolve `src` with a fetcher configured from the environment.
///
/// See [`ImageFetcher::fetch`].
pub fn fetch_image_source(src: &str) -> Result<Vec<u8>, FetchError> {
    ImageFetcher::new(&FetchConfig::from_env()).fetch(src)
}

/// Decode `data:<mime>[;param...][;base64],<payload>`.
///
/// Base64 payloads may be percent-encoded and may contain whitespace; other payloads are
/// percent-decoded.
fn decode_data_uri(src: &str) -> Result<Vec<u8>, FetchError> {
    let rest = src
        .get(5..)
        .ok_or_else(|| FetchError::MalformedDataUri("missing 'data:' prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| FetchError::MalformedDataUri("missing ',' separator".to_string()))?;

    let is_base64 = header
        .rsplit(';')
        .next()
        .is_some_and(|p| p.trim().eq_ignore_ascii_case("base64"));

    let decoded = urlencoding::decode_binary(payload.as_bytes());
    if !is_base64 {
        return Ok(decoded.into_owned());
    }

    let compact: Vec<u8> = decoded
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    BASE64_LENIENT
        .decode(compact)
        .map_err(|e| FetchError::MalformedDataUri(format!("base64 payload: {e}")))
}

fn truncate_for_log(src: &str) -> String {
    const MAX: usize = 64;
    if src.chars().count() <= MAX {
        return src.to_string();
    }
    let mut s: String = src.chars().take(MAX).collect();
    s.push_str("...");
    s
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
