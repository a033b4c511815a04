//! HS256 token verification.
//!
//! Order of checks: segment shape, header `alg`, signature, payload, then the
//! `nbf`/`exp` window. The payload is only parsed once the signature matched.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use hmac::{Hmac, Mac};
use serde::{Deserialize, de::DeserializeOwned};
use sha2::Sha256;

use crate::services::auth::constant_time::constant_time_eq;
use crate::services::auth::types::{AuthFailure, Claims};
use crate::services::secrets::Secret;

type HmacSha256 = Hmac<Sha256>;

/// The only accepted `alg`.
pub const SUPPORTED_ALG: &str = "HS256";

// base64url without padding on encode; padding tolerated on decode.
const BASE64URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Deserialize)]
struct TokenHeader {
    alg: String,
}

/// Verify `token` against `secret` at the current wall-clock time.
pub fn verify(token: &str, secret: &Secret) -> Result<Claims, AuthFailure> {
    verify_at(token, secret, chrono::Utc::now().timestamp())
}

/// Verify `token` against `secret` as of `now` (Unix seconds).
pub fn verify_at(token: &str, secret: &Secret, now: i64) -> Result<Claims, AuthFailure> {
    let mut segments = token.split('.');
    let (Some(header_seg), Some(payload_seg), Some(signature_seg), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthFailure::MalformedToken);
    };

    let header: TokenHeader = decode_segment(header_seg)?;
    if header.alg != SUPPORTED_ALG {
        return Err(AuthFailure::UnknownAlgorithm);
    }

    let expected = sign(header_seg, payload_seg, secret)?;
    if !constant_time_eq(expected.as_bytes(), signature_seg.as_bytes()) {
        return Err(AuthFailure::SignatureMismatch);
    }

    let claims: Claims = decode_segment(payload_seg)?;
    if claims.organization.is_empty() {
        return Err(AuthFailure::MalformedToken);
    }

    let now = now as f64;

    if let Some(nbf) = claims.nbf
        && now < nbf
    {
        return Err(AuthFailure::TokenNotYetValid);
    }

    if let Some(exp) = claims.exp
        && now > exp
    {
        return Err(AuthFailure::TokenExpired);
    }

    Ok(claims)
}

/// base64url(HMAC-SHA256(secret, "<header>.<payload>")).
pub fn sign(header_seg: &str, payload_seg: &str, secret: &Secret) -> Result<String, AuthFailure> {
    // HMAC accepts keys of any length; an error here means the key is unusable.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| AuthFailure::SecretUnavailable)?;

    mac.update(header_seg.as_bytes());
    mac.update(b".");
    mac.update(payload_seg.as_bytes());

    Ok(BASE64URL.encode(mac.finalize().into_bytes()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T, AuthFailure> {
    let bytes = BASE64URL
        .decode(segment)
        .map_err(|_| AuthFailure::MalformedToken)?;
    serde_json::from_slice(&bytes).map_err(|_| AuthFailure::MalformedToken)
}
