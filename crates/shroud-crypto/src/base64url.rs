//! Unpadded base64url (RFC 7515) helpers.

use base64ct::{Base64UrlUnpadded, Encoding};

/// Base64url encode bytes without padding.
pub fn base64url_encode(data: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(data)
}

/// Base64url decode a string to bytes.
///
/// Padded input is rejected: `=` is not part of the unpadded alphabet, so
/// padded and unpadded encodings of the same bytes cannot alias.
pub fn base64url_decode(s: &str) -> Result<Vec<u8>, base64ct::Error> {
    Base64UrlUnpadded::decode_vec(s)
}

/// Base64url decode a string into a fixed-length array.
pub fn base64url_decode_array<const N: usize>(s: &str) -> Result<[u8; N], base64ct::Error> {
    let mut out = [0u8; N];
    let decoded = Base64UrlUnpadded::decode(s, &mut out)?;
    if decoded.len() != N {
        return Err(base64ct::Error::InvalidLength);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let data = b"Hello, World!";
        let encoded = base64url_encode(data);
        let decoded = base64url_decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn no_padding() {
        let encoded = base64url_encode(b"ab");
        assert!(!encoded.contains('='));
    }

    #[test]
    fn url_safe_chars() {
        // Bytes that would produce + and / in standard base64
        let data = vec![0xfb, 0xff, 0xfe];
        let encoded = base64url_encode(&data);
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn rejects_padded_input() {
        assert!(base64url_decode("YWI=").is_err());
    }

    #[test]
    fn empty_input() {
        assert_eq!(base64url_encode(b""), "");
        assert_eq!(base64url_decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn fixed_length_round_trip() {
        let data = [7u8; 32];
        let encoded = base64url_encode(&data);
        let decoded: [u8; 32] = base64url_decode_array(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn fixed_length_rejects_wrong_size() {
        let encoded = base64url_encode(&[1u8; 16]);
        assert!(base64url_decode_array::<32>(&encoded).is_err());
    }
}
