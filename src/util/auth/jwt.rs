use axum::http::{HeaderMap, header};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: Uuid,
    pub exp: i64,
}

pub fn token_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 60;
    validation
}

/// Accepts both `Authorization: Token <jwt>` and `Authorization: Bearer <jwt>`.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") {
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    } else {
        None
    }
}

pub fn decode_token(
    token: &str,
    key: &DecodingKey,
    validation: &Validation,
) -> anyhow::Result<TokenClaims> {
    let data = decode::<TokenClaims>(token, key, validation)?;
    Ok(data.claims)
}

#[cfg(test)]
pub fn issue_token(user_id: Uuid, secret: &str, ttl: chrono::Duration) -> String {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = TokenClaims {
        id: user_id,
        exp: (chrono::Utc::now() + ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    const SECRET: &str = "test-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_token_and_bearer_schemes() {
        assert_eq!(extract_token(&headers_with("Token abc")), Some("abc"));
        assert_eq!(extract_token(&headers_with("Bearer xyz")), Some("xyz"));
        assert_eq!(extract_token(&headers_with("Basic Zm9vOmJhcg==")), None);
        assert_eq!(extract_token(&headers_with("Token")), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn round_trips_user_id() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, SECRET, chrono::Duration::hours(1));

        let claims = decode_token(
            &token,
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &token_validation(),
        )
        .unwrap();

        assert_eq!(claims.id, user_id);
    }

    #[test]
    fn rejects_expired_and_foreign_tokens() {
        let user_id = Uuid::new_v4();
        let key = DecodingKey::from_secret(SECRET.as_bytes());

        let expired = issue_token(user_id, SECRET, chrono::Duration::hours(-2));
        assert!(decode_token(&expired, &key, &token_validation()).is_err());

        let foreign = issue_token(user_id, "another-secret", chrono::Duration::hours(1));
        assert!(decode_token(&foreign, &key, &token_validation()).is_err());
    }
}
