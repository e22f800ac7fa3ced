//! Verificación de tokens del proveedor de identidad
//!
//! Los usuarios (clientes y administradores) inician sesión en el proveedor
//! de identidad externo; la API solo verifica el JWT HS256 que este firma.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

/// Claims que emite el proveedor de identidad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Servicio JWT
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str, audience: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_audience.as_deref())
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<IdentityClaims, AppError> {
        decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Firmar un token con el mismo secreto (entornos locales y tests)
    pub fn generate_token(&self, claims: &IdentityClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn claims(email: &str, aud: Option<&str>, ttl: Duration) -> IdentityClaims {
        let now = Utc::now();
        IdentityClaims {
            sub: "user-123".to_string(),
            email: Some(email.to_string()),
            aud: aud.map(str::to_string),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = JwtService::new("secret", Some("authenticated"));
        let token = service
            .generate_token(&claims("rin@example.com", Some("authenticated"), Duration::hours(1)))
            .unwrap();

        let decoded = service.validate_token(&token).unwrap();
        assert_eq!(decoded.sub, "user-123");
        assert_eq!(decoded.email.as_deref(), Some("rin@example.com"));
    }

    #[test]
    fn test_wrong_secret_or_audience_is_rejected() {
        let issuer = JwtService::new("secret", None);
        let token = issuer
            .generate_token(&claims("rin@example.com", Some("anon"), Duration::hours(1)))
            .unwrap();

        assert!(JwtService::new("other-secret", None).validate_token(&token).is_err());
        assert!(JwtService::new("secret", Some("authenticated")).validate_token(&token).is_err());
        assert!(JwtService::new("secret", None).validate_token(&token).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = JwtService::new("secret", None);
        let token = service
            .generate_token(&claims("rin@example.com", None, Duration::hours(-2)))
            .unwrap();
        assert!(matches!(service.validate_token(&token), Err(AppError::Unauthorized(_))));
    }
}
