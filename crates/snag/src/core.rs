//! Core layer: pure byte-to-text transformations.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};

use crate::data::Encoding;

/// Render raw bytes as text in the given encoding.
///
/// Decoding is total: utf8 and utf16le replace invalid sequences with
/// U+FFFD, utf16le drops a trailing odd byte, ascii masks each byte to
/// 7 bits, and the binary-to-text encodings (base64, base64url, hex)
/// render the bytes in that representation rather than interpreting them.
pub fn decode(bytes: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        Encoding::Utf16Le => {
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        Encoding::Ascii => bytes.iter().map(|&b| (b & 0x7f) as char).collect(),
        Encoding::Base64 => STANDARD.encode(bytes),
        Encoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        Encoding::Hex => hex::encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_utf8() {
        assert_eq!(decode(b"test", Encoding::Utf8), "test");
    }

    #[test]
    fn decode_utf8_replaces_invalid_sequences() {
        assert_eq!(decode(&[0x74, 0xff], Encoding::Utf8), "t\u{fffd}");
    }

    #[test]
    fn decode_utf16le_pairs() {
        let bytes = [0x74, 0x00, 0x65, 0x00, 0x73, 0x00, 0x74, 0x00];
        assert_eq!(decode(&bytes, Encoding::Utf16Le), "test");
    }

    #[test]
    fn decode_utf16le_drops_trailing_odd_byte() {
        let bytes = [0x74, 0x00, 0x65];
        assert_eq!(decode(&bytes, Encoding::Utf16Le), "t");
    }

    #[test]
    fn decode_latin1() {
        assert_eq!(decode(&[0x74, 0xe9], Encoding::Latin1), "t\u{e9}");
    }

    #[test]
    fn decode_ascii_masks_high_bit() {
        assert_eq!(decode(&[0xf4, 0x65], Encoding::Ascii), "te");
    }

    #[test]
    fn decode_base64_renders_bytes() {
        assert_eq!(decode(b"test", Encoding::Base64), "dGVzdA==");
    }

    #[test]
    fn decode_base64_inverts_base64_encoded_input() {
        // [0xb5, 0xeb, 0x2d] is the base64 decoding of "test".
        assert_eq!(decode(&[0xb5, 0xeb, 0x2d], Encoding::Base64), "test");
    }

    #[test]
    fn decode_base64url_is_unpadded() {
        assert_eq!(decode(b"test", Encoding::Base64Url), "dGVzdA");
        assert_eq!(decode(&[0xfb, 0xff], Encoding::Base64Url), "-_8");
    }

    #[test]
    fn decode_hex() {
        assert_eq!(decode(b"test", Encoding::Hex), "74657374");
    }
}
