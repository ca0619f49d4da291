//! Data layer: immutable request and decoding types.

use std::str::FromStr;

use crate::error::{Error, ParseEncodingError, Result};

/// Fixed User-Agent sent with every request; servers that reject
/// unidentified clients must still be reachable.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";

/// URL scheme accepted by the downloader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Prefix test only; the rest of the URL is left to the transport.
    /// Fails before any network activity for every other scheme.
    pub fn of(url: &str) -> Result<Self> {
        if url.starts_with("https://") {
            Ok(Scheme::Https)
        } else if url.starts_with("http://") {
            Ok(Scheme::Http)
        } else {
            Err(Error::UnsupportedScheme { url: url.to_string() })
        }
    }
}

/// Text encoding used to render a downloaded body as a string.
///
/// The recognized names mirror the buffer encodings of the original codec
/// set: `utf8`, `utf16le`/`ucs2`, `latin1`/`binary`, `ascii`, `base64`,
/// `base64url` and `hex`, with the dashed spellings accepted where they
/// exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Base64,
    Base64Url,
    Hex,
}

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "base64" => Ok(Encoding::Base64),
            "base64url" => Ok(Encoding::Base64Url),
            "hex" => Ok(Encoding::Hex),
            _ => Err(ParseEncodingError(s.to_string())),
        }
    }
}

/// How the destination file is opened in streamed mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

/// Options for [`Downloader::download_to_file`](crate::Downloader::download_to_file).
#[derive(Debug, Clone, Copy)]
pub struct FileOptions {
    append: bool,
}

impl Default for FileOptions {
    fn default() -> Self { Self::new() }
}

impl FileOptions {
    pub fn new() -> Self { Self { append: false } }

    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn write_mode(&self) -> WriteMode {
        if self.append {
            WriteMode::Append
        } else {
            WriteMode::Truncate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_of_accepts_both_prefixes() {
        assert_eq!(Scheme::of("http://url").unwrap(), Scheme::Http);
        assert_eq!(Scheme::of("https://url").unwrap(), Scheme::Https);
    }

    #[test]
    fn scheme_of_rejects_anything_else() {
        let err = Scheme::of("ftp://url").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown protocol in url ftp://url, expected one of \"http\" or \"https\""
        );
    }

    #[test]
    fn encoding_parses_recognized_names() {
        assert_eq!("utf8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("utf-8".parse::<Encoding>().unwrap(), Encoding::Utf8);
        assert_eq!("ucs2".parse::<Encoding>().unwrap(), Encoding::Utf16Le);
        assert_eq!("utf16le".parse::<Encoding>().unwrap(), Encoding::Utf16Le);
        assert_eq!("binary".parse::<Encoding>().unwrap(), Encoding::Latin1);
        assert_eq!("base64url".parse::<Encoding>().unwrap(), Encoding::Base64Url);
        assert_eq!("hex".parse::<Encoding>().unwrap(), Encoding::Hex);
    }

    #[test]
    fn encoding_rejects_unknown_names() {
        let err = "wrong_encoding".parse::<Encoding>().unwrap_err();
        assert_eq!(err.to_string(), "unknown encoding wrong_encoding");
    }

    #[test]
    fn encoding_defaults_to_utf8() {
        assert_eq!(Encoding::default(), Encoding::Utf8);
    }

    #[test]
    fn file_options_select_write_mode() {
        assert_eq!(FileOptions::new().write_mode(), WriteMode::Truncate);
        assert_eq!(FileOptions::new().append(true).write_mode(), WriteMode::Append);
    }
}
