use crate::services::auth::types::AuthFailure;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` value.
///
/// The scheme compares case-insensitively; the token must be non-empty.
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthFailure> {
    let value = authorization.ok_or(AuthFailure::MissingAuthHeader)?;

    let (scheme, token) = value
        .split_at_checked(BEARER_PREFIX.len())
        .ok_or(AuthFailure::MalformedBearer)?;

    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) || token.is_empty() {
        return Err(AuthFailure::MalformedBearer);
    }

    Ok(token)
}
