//! Parsing and verification primitives for webhook message signatures.
//!
//! Webhook deliveries carry an Ed25519 signature over a canonical string
//! derived from the `Content-Digest` header, described by the
//! `Signature` and `Signature-Input` headers. Everything here is pure;
//! the async key fetch lives in the service layer.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use constant_time_eq::constant_time_eq;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

/// Maximum accepted signature age, in seconds.
pub(crate) const SIGNATURE_TOLERANCE_SECS: u64 = 300;

/// DER prefix of an Ed25519 SubjectPublicKeyInfo (RFC 8410).
const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Parsed `Content-Digest` header: `<algorithm>=:<base64-hash>:`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ContentDigest<'a> {
    pub algorithm: &'a str,
    pub hash: &'a str,
}

pub(crate) fn parse_content_digest(header: &str) -> Option<ContentDigest<'_>> {
    let (algorithm, rest) = header.trim().split_once('=')?;
    let hash = rest.strip_prefix(':')?.strip_suffix(':')?;
    if algorithm.is_empty() || hash.is_empty() {
        return None;
    }
    Some(ContentDigest { algorithm, hash })
}

/// `true` when the algorithm names SHA-256, ignoring case and hyphens.
pub(crate) fn is_sha256(algorithm: &str) -> bool {
    algorithm.to_ascii_lowercase().replace('-', "") == "sha256"
}

/// Recompute the SHA-256 of the raw payload and compare it to the
/// header's base64 hash in constant time. Unknown algorithms fail.
pub(crate) fn digest_matches(digest: &ContentDigest<'_>, payload: &[u8]) -> bool {
    if !is_sha256(digest.algorithm) {
        return false;
    }
    let computed = BASE64.encode(Sha256::digest(payload));
    constant_time_eq(computed.as_bytes(), digest.hash.as_bytes())
}

/// Extract signature bytes from `sig_<N>=:<base64>:`.
pub(crate) fn parse_signature(header: &str) -> Option<Vec<u8>> {
    let (label, rest) = header.trim().split_once('=')?;
    let ordinal = label.strip_prefix("sig_")?;
    if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let encoded = rest.strip_prefix(':')?.strip_suffix(':')?;
    BASE64.decode(encoded).ok()
}

/// Parsed `Signature-Input` metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SignatureInput {
    pub created: u64,
    pub algorithm: String,
    pub key_id: String,
}

/// Parse `<label>=("content-digest");created=<ts>;alg="<alg>";keyid="<id>"`.
///
/// The covered-component list must be exactly `("content-digest")`;
/// unrecognized parameters make the header malformed.
pub(crate) fn parse_signature_input(header: &str) -> Option<SignatureInput> {
    let (_, rest) = header.trim().split_once('=')?;
    let mut parts = rest.split(';');

    if parts.next()? != "(\"content-digest\")" {
        return None;
    }

    let mut created = None;
    let mut algorithm = None;
    let mut key_id = None;

    for part in parts {
        let (name, value) = part.split_once('=')?;
        match name {
            "created" => created = Some(value.parse::<u64>().ok()?),
            "alg" => algorithm = Some(unquote(value)?.to_string()),
            "keyid" => key_id = Some(unquote(value)?.to_string()),
            _ => return None,
        }
    }

    Some(SignatureInput {
        created: created?,
        algorithm: algorithm?,
        key_id: key_id?,
    })
}

fn unquote(value: &str) -> Option<&str> {
    value.strip_prefix('"')?.strip_suffix('"')
}

/// A signature is fresh when it is no more than `tolerance` seconds old.
/// Timestamps in the future are not rejected.
pub(crate) fn is_fresh(created: u64, now: u64, tolerance: u64) -> bool {
    now.saturating_sub(created) <= tolerance
}

/// Reconstruct the canonical string the sender signed: the raw
/// `Content-Digest` value and the signature parameters, newline-joined
/// with no trailing newline.
pub(crate) fn signing_string(content_digest: &str, input: &SignatureInput) -> String {
    format!(
        "\"content-digest\": {content_digest}\n\"@signature-params\": (\"content-digest\");created={};alg=\"{}\";keyid=\"{}\"",
        input.created, input.algorithm, input.key_id
    )
}

/// Decode a verification key from base64 SPKI (optionally PEM-armored)
/// or raw 32-byte form.
pub(crate) fn decode_public_key(key: &str) -> Option<VerifyingKey> {
    let body: String = key
        .lines()
        .filter(|line| !line.trim_start().starts_with("-----"))
        .flat_map(|line| line.split_whitespace())
        .collect();

    let der = BASE64.decode(body).ok()?;
    let raw: [u8; 32] = match der.len() {
        44 if der[..12] == ED25519_SPKI_PREFIX => der[12..].try_into().ok()?,
        32 => der.as_slice().try_into().ok()?,
        _ => return None,
    };

    VerifyingKey::from_bytes(&raw).ok()
}

/// Verify the Ed25519 signature over the canonical string.
pub(crate) fn verify_signature(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> bool {
    match Signature::from_slice(signature) {
        Ok(signature) => key.verify(message, &signature).is_ok(),
        Err(_) => false,
    }
}
