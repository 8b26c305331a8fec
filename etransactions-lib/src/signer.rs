//! Request signature (`PBX_HMAC`).
//!
//! RFC 2104 HMAC over the canonical parameter string, keyed with the decoded
//! merchant secret. The gateway expects the digest as uppercase hex.

use crate::errors::EtransactionsError;
use crate::values::{HashAlgorithm, HashValue, SecretValue, WireValue};
use crate::Result;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

fn compute<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| EtransactionsError::Crypto(format!("invalid HMAC key: {}", e)))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Raw HMAC digest bytes.
pub fn digest(key: &[u8], message: &[u8], algorithm: HashAlgorithm) -> Result<Vec<u8>> {
    match algorithm {
        HashAlgorithm::Sha224 => compute::<Hmac<Sha224>>(key, message),
        HashAlgorithm::Sha256 => compute::<Hmac<Sha256>>(key, message),
        HashAlgorithm::Sha384 => compute::<Hmac<Sha384>>(key, message),
        HashAlgorithm::Sha512 => compute::<Hmac<Sha512>>(key, message),
    }
}

/// Uppercase hex HMAC of `message`.
///
/// ```rust
/// use etransactions_lib::signer::sign;
/// use etransactions_lib::HashAlgorithm;
///
/// let signature = sign(b"key", "PBX_SITE=1", HashAlgorithm::Sha256)?;
/// assert_eq!(signature.len(), 64);
/// # Ok::<(), etransactions_lib::EtransactionsError>(())
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip(key, message), fields(message_len = message.len())))]
pub fn sign(key: &[u8], message: &str, algorithm: HashAlgorithm) -> Result<String> {
    digest(key, message.as_bytes(), algorithm).map(hex::encode_upper)
}

/// Like [`sign`], resolving the algorithm from its textual tag.
///
/// Fails with [`EtransactionsError::UnsupportedAlgorithm`] for tags outside
/// [`HashAlgorithm::ALL`].
pub fn sign_with_tag(key: &[u8], message: &str, tag: &str) -> Result<String> {
    let algorithm = HashAlgorithm::from_tag(tag)
        .ok_or_else(|| EtransactionsError::UnsupportedAlgorithm(tag.to_string()))?;
    sign(key, message, algorithm)
}

/// Signature field, rendered last in the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HmacValue(String);

impl HmacValue {
    pub const WIRE_KEY: &'static str = "PBX_HMAC";

    pub fn compute(secret: &SecretValue, message: &str, hash: &HashValue) -> Result<Self> {
        sign(secret.key_bytes(), message, hash.value()).map(Self)
    }

    /// Checks a received signature against `message`, in constant time.
    /// Hex case is ignored.
    pub fn verify(
        secret: &SecretValue,
        message: &str,
        hash: &HashValue,
        candidate: &str,
    ) -> Result<bool> {
        let expected = Self::compute(secret, message, hash)?;
        let candidate = candidate.trim().to_ascii_uppercase();
        Ok(expected.0.as_bytes().ct_eq(candidate.as_bytes()).into())
    }

    /// Uppercase hex digest.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl WireValue for HmacValue {
    fn wire_key(&self) -> &'static str {
        Self::WIRE_KEY
    }

    fn wire_value(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    const KEY: &[u8] = b"Jefe";
    const DATA: &str = "what do ya want for nothing?";

    #[test]
    fn test_rfc4231_case2_all_algorithms() {
        assert_eq!(
            sign(KEY, DATA, HashAlgorithm::Sha224).unwrap(),
            "A30E01098BC6DBBF45690F3A7E9E6D0F8BBEA2A39E6148008FD05E44"
        );
        assert_eq!(
            sign(KEY, DATA, HashAlgorithm::Sha256).unwrap(),
            "5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
        assert_eq!(
            sign(KEY, DATA, HashAlgorithm::Sha384).unwrap(),
            "AF45D2E376484031617F78D2B58A6B1B9C7EF464F5A01B47E42EC3736322445E8E2240CA5E69E2C78B3239ECFAB21649"
        );
        assert_eq!(
            sign(KEY, DATA, HashAlgorithm::Sha512).unwrap(),
            "164B7A7BFCF819E2E395FBE73B56E0A387BD64222E831FD610270CD7EA2505549758BF75C05A994A6D034F65F8F0E6FDCAEAB1A34D4A6B4B636E070A38BCE737"
        );
    }

    #[test]
    fn test_digest_length_matches_algorithm() {
        for algorithm in HashAlgorithm::ALL {
            let bytes = digest(KEY, DATA.as_bytes(), algorithm).unwrap();
            assert_eq!(bytes.len(), algorithm.output_len());
        }
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign(b"\x12\x34", "PBX_SITE=1", HashAlgorithm::Sha512).unwrap();
        let second = sign(b"\x12\x34", "PBX_SITE=1", HashAlgorithm::Sha512).unwrap();
        assert_eq!(first, second);

        let other = sign(b"\x12\x34", "PBX_SITE=2", HashAlgorithm::Sha512).unwrap();
        assert_ne!(first, other);
    }

    #[test]
    fn test_sign_with_tag() {
        assert_eq!(
            sign_with_tag(KEY, DATA, "SHA256").unwrap(),
            sign(KEY, DATA, HashAlgorithm::Sha256).unwrap()
        );
        let err = sign_with_tag(KEY, DATA, "RIPEMD160").unwrap_err();
        assert!(matches!(err, EtransactionsError::UnsupportedAlgorithm(tag) if tag == "RIPEMD160"));
    }

    #[test]
    fn test_hmac_value_wire_format() {
        let secret = SecretValue::new("4a656665").unwrap(); // "Jefe"
        let hmac = HmacValue::compute(&secret, DATA, &HashValue::new(HashAlgorithm::Sha256)).unwrap();
        assert_eq!(
            hmac.to_parameter(),
            "PBX_HMAC=5BDCC146BF60754E6A042426089575C75A003F089D2739839DEC58B964EC3843"
        );
    }

    #[test]
    fn test_verify() {
        let secret = SecretValue::new("4a656665").unwrap();
        let hash = HashValue::new(HashAlgorithm::Sha256);
        let lower = "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843";
        assert!(HmacValue::verify(&secret, DATA, &hash, lower).unwrap());
        assert!(!HmacValue::verify(&secret, "tampered", &hash, lower).unwrap());
        assert!(!HmacValue::verify(&secret, DATA, &hash, "abc").unwrap());
    }
}
