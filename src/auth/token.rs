//! Signed bearer token codec.
//!
//! Wire format:
//!
//! ```text
//! <base64(payload)>.<hex(hmac_sha256(secret, payload))>
//! payload = "<username>:<issued_at_ms>"
//! ```
//!
//! Parsing and signature checking are separate steps: [`decode`] needs no
//! secret, [`crate::auth::TokenVerifier`] does.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::error::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Standard alphabet; emits padding, accepts it either way on decode.
const PAYLOAD_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Identity carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: String,
    /// `None` when the text after the first `:` is not a decimal timestamp,
    /// which happens for usernames that contain `:` themselves.
    pub issued_at_ms: Option<u64>,
}

/// Result of a structural parse. `payload` is the exact signed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedToken<'a> {
    pub claims: TokenClaims,
    pub payload: String,
    pub signature: &'a str,
}

/// Lowercase hex HMAC-SHA256 of `payload`.
pub fn sign(payload: &str, secret: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Mint a token for `username` issued at `issued_at_ms`.
pub fn encode(username: &str, issued_at_ms: u64, secret: &[u8]) -> String {
    let payload = format!("{}:{}", username, issued_at_ms);
    let signature = sign(&payload, secret);
    format!("{}.{}", PAYLOAD_B64.encode(payload.as_bytes()), signature)
}

/// Parse a token without checking its signature.
///
/// The username is everything before the first `:` of the payload. Both sides
/// must be non-empty; the signature covers the whole payload, so a remainder
/// that is not a timestamp still decodes.
pub fn decode(token: &str) -> Result<DecodedToken<'_>, TokenError> {
    let (payload_b64, signature) = token.split_once('.').ok_or(TokenError::MalformedToken)?;
    if payload_b64.is_empty() || signature.is_empty() || signature.contains('.') {
        return Err(TokenError::MalformedToken);
    }

    let raw = PAYLOAD_B64
        .decode(payload_b64)
        .map_err(|_| TokenError::MalformedToken)?;
    let payload = String::from_utf8(raw).map_err(|_| TokenError::MalformedToken)?;

    let (username, issued_at) = payload.split_once(':').ok_or(TokenError::MalformedToken)?;
    if username.is_empty() || issued_at.is_empty() {
        return Err(TokenError::MalformedToken);
    }
    let issued_at_ms = if issued_at.bytes().all(|b| b.is_ascii_digit()) {
        issued_at.parse::<u64>().ok()
    } else {
        None
    };

    let claims = TokenClaims {
        username: username.to_string(),
        issued_at_ms,
    };

    Ok(DecodedToken {
        claims,
        payload,
        signature,
    })
}

/// Constant-time equality of two signature strings.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn test_encode_layout() {
        let token = encode("alice", 1_700_000_000_000, SECRET);
        let (payload_b64, sig) = token.split_once('.').unwrap();

        let payload = String::from_utf8(PAYLOAD_B64.decode(payload_b64).unwrap()).unwrap();
        assert_eq!(payload, "alice:1700000000000");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(sig, sign("alice:1700000000000", SECRET));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        assert_eq!(
            sign("what do ya want for nothing?", b"Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_decode_roundtrip() {
        let token = encode("bob", 42, SECRET);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.claims.username, "bob");
        assert_eq!(decoded.claims.issued_at_ms, Some(42));
        assert_eq!(decoded.payload, "bob:42");
        assert_eq!(decoded.signature, sign("bob:42", SECRET));
    }

    #[test]
    fn test_decode_accepts_unpadded_payload() {
        // "ab:1" encodes to "YWI6MQ==" padded
        let decoded = decode("YWI6MQ.deadbeef").unwrap();
        assert_eq!(decoded.claims.username, "ab");
        assert_eq!(decoded.claims.issued_at_ms, Some(1));
    }

    #[test]
    fn test_decode_rejects_bad_delimiters() {
        assert_eq!(decode(""), Err(TokenError::MalformedToken));
        assert_eq!(decode("abc"), Err(TokenError::MalformedToken));
        assert_eq!(decode(".sig"), Err(TokenError::MalformedToken));
        assert_eq!(decode("YWI6MQ=="), Err(TokenError::MalformedToken));
        assert_eq!(decode("YWI6MQ==."), Err(TokenError::MalformedToken));
        assert_eq!(decode("a.b.c"), Err(TokenError::MalformedToken));
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert_eq!(decode("not-base64!!.abcd"), Err(TokenError::MalformedToken));
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let payload = PAYLOAD_B64.encode([0xff, 0xfe, b':', b'1']);
        assert_eq!(
            decode(&format!("{}.abcd", payload)),
            Err(TokenError::MalformedToken)
        );
    }

    #[test]
    fn test_decode_rejects_bad_payload() {
        for payload in ["alice", ":123", "alice:"] {
            let token = format!("{}.abcd", PAYLOAD_B64.encode(payload));
            assert_eq!(decode(&token), Err(TokenError::MalformedToken), "{}", payload);
        }
    }

    #[test]
    fn test_username_with_colon_is_truncated() {
        // First colon wins: username "a", remainder "b:1"
        let token = encode("a:b", 1, SECRET);
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.claims.username, "a");
        assert_eq!(decoded.claims.issued_at_ms, None);
        assert_eq!(decoded.payload, "a:b:1");
    }

    #[test]
    fn test_non_numeric_timestamp_decodes_without_time() {
        for payload in ["alice:12x", "alice:-5", "alice:99999999999999999999999"] {
            let token = format!("{}.abcd", PAYLOAD_B64.encode(payload));
            let decoded = decode(&token).unwrap();
            assert_eq!(decoded.claims.username, "alice");
            assert_eq!(decoded.claims.issued_at_ms, None, "{}", payload);
        }
    }

    #[test]
    fn test_signatures_match() {
        assert!(signatures_match("abc123", "abc123"));
        assert!(!signatures_match("abc123", "abc124"));
        assert!(!signatures_match("abc123", "ABC123"));
        assert!(!signatures_match("abc123", "abc12"));
    }
}
