use std::net::IpAddr;

use reqwest::Url;
use secrecy::Secret;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub intake: IntakeConfig,
}

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub url: Url,
    pub credentials: IntakeCredentials,
}

/// Authentication material for the intake endpoint. Any combination may be
/// absent; resolution happens per request in `relay::credential`.
#[derive(Debug, Clone, Default)]
pub struct IntakeCredentials {
    /// Precomputed `Authorization` header value, e.g. `Basic dXNlcjpwYXNz`.
    pub authorization: Option<Secret<String>>,
    pub user: Option<String>,
    pub pass: Option<Secret<String>>,
}

impl IntakeCredentials {
    pub fn is_empty(&self) -> bool {
        self.authorization.is_none() && (self.user.is_none() || self.pass.is_none())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let url = env_required("RELAY_INTAKE_URL")?;
        let url: Url = url
            .parse()
            .map_err(|e| format!("Invalid RELAY_INTAKE_URL: {e}"))?;

        let host: IpAddr = env_or("RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid RELAY_HOST: {e}"))?;

        let port: u16 = env_or("RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid RELAY_PORT: {e}"))?;

        let max_body_size: usize = env_or("RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid RELAY_MAX_BODY_SIZE: {e}"))?;

        let cors_origins = parse_origins(&env_or("RELAY_CORS_ORIGINS", ""));

        let log_level = env_or("RELAY_LOG_LEVEL", "info");

        let credentials = IntakeCredentials {
            authorization: env_optional("RELAY_INTAKE_AUTHORIZATION").map(Secret::new),
            user: env_optional("RELAY_INTAKE_USER"),
            pass: env_optional("RELAY_INTAKE_PASS").map(Secret::new),
        };

        Ok(Config {
            host,
            port,
            max_body_size,
            cors_origins,
            log_level,
            intake: IntakeConfig { url, credentials },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn env_required(key: &str) -> Result<String, String> {
    env_optional(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
}

/// Empty values count as unset.
fn env_optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn credentials_need_authorization_or_both_halves() {
        let mut creds = IntakeCredentials::default();
        assert!(creds.is_empty());

        creds.user = Some("relay".into());
        assert!(creds.is_empty());

        creds.pass = Some(Secret::new("hunter2".into()));
        assert!(!creds.is_empty());

        let creds = IntakeCredentials {
            authorization: Some(Secret::new("Basic abc".into())),
            ..Default::default()
        };
        assert!(!creds.is_empty());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = IntakeCredentials {
            authorization: Some(Secret::new("Basic c2VjcmV0".into())),
            user: Some("relay".into()),
            pass: Some(Secret::new("hunter2".into())),
        };
        let out = format!("{creds:?}");
        assert!(!out.contains("c2VjcmV0"));
        assert!(!out.contains("hunter2"));
    }
}
