use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::ExposeSecret;

use crate::config::IntakeCredentials;
use crate::error::RelayError;

/// Resolve the `Authorization` header value for the intake endpoint.
///
/// A precomputed value wins; otherwise user and password are encoded as HTTP
/// Basic. With neither available the relay must not call upstream.
pub fn resolve(creds: &IntakeCredentials) -> Result<HeaderValue, RelayError> {
    let raw = if let Some(authorization) = &creds.authorization {
        authorization.expose_secret().trim().to_string()
    } else if let (Some(user), Some(pass)) = (&creds.user, &creds.pass) {
        basic(user, pass.expose_secret())
    } else {
        return Err(RelayError::ServerMisconfigured);
    };

    let mut value = HeaderValue::from_str(&raw).map_err(|_| {
        RelayError::Internal("Credencial de autorización no válida".to_string())
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}
