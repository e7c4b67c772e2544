//! Character decoding for mnemonic input streams.
//!
//! Mnemonic exports are normally UTF-8, but older tools write Windows-1252
//! (a superset of Latin-1 in the printable range). The decision is made once
//! for the whole stream: if every byte sequence is valid UTF-8 the stream is
//! UTF-8, otherwise the whole stream is decoded as Windows-1252. Mixing the
//! two inside one file is not supported.

use crate::error::{MarcError, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Character encoding detected for, or forced on, an input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8 (the default for modern exports)
    Utf8,
    /// Windows-1252, also used for Latin-1 input
    Windows1252,
}

impl TextEncoding {
    fn encoding(self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Windows1252 => WINDOWS_1252,
        }
    }

    /// WHATWG label of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.encoding().name()
    }
}

/// Decode a whole stream, falling back to Windows-1252 when it is not UTF-8.
///
/// A UTF-8 byte order mark is stripped. Windows-1252 decoding maps every byte,
/// so this never fails.
///
/// # Examples
///
/// ```
/// use serial_holdings::encoding::{decode_stream, TextEncoding};
///
/// let (text, used) = decode_stream(b"=245  00$aCaf\xe9");
/// assert_eq!(text, "=245  00$aCafé");
/// assert_eq!(used, TextEncoding::Windows1252);
/// ```
#[must_use]
pub fn decode_stream(bytes: &[u8]) -> (String, TextEncoding) {
    let body = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
        _ => bytes,
    };

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        return (text.into_owned(), TextEncoding::Utf8);
    }

    tracing::debug!(bytes = body.len(), "input is not UTF-8, decoding as windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(body);
    (text.into_owned(), TextEncoding::Windows1252)
}

/// Decode bytes in a known encoding without fallback.
///
/// # Errors
///
/// Returns [`MarcError::EncodingError`] when `bytes` contain sequences that
/// are malformed for `encoding`.
pub fn decode_with(bytes: &[u8], encoding: TextEncoding) -> Result<String> {
    encoding
        .encoding()
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
        .ok_or_else(|| {
            MarcError::EncodingError(format!("input is not valid {}", encoding.name()))
        })
}
