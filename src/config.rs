use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Mocked backends
    pub simulated_latency: Duration,
    pub backend_timeout: Duration,
    pub mock_profile_store_fail: bool,
    pub demo_login_email: String,

    // Screens
    pub success_notice_duration: Duration,
    pub max_request_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: Environment::Dev,
            server_addr: "0.0.0.0:8080".to_string(),
            cors_allow_origins: vec!["http://localhost:3000".to_string()],
            simulated_latency: Duration::from_millis(1500),
            backend_timeout: Duration::from_secs(10),
            mock_profile_store_fail: false,
            demo_login_email: "test@example.com".to_string(),
            success_notice_duration: Duration::from_secs(3),
            max_request_body_bytes: 8 * 1024 * 1024,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let env = Environment::parse(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or(defaults.server_addr);
        server_addr
            .parse::<std::net::SocketAddr>()
            .with_context(|| format!("SERVER_ADDR is not a socket address: {server_addr}"))?;

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Mocked backends
        let simulated_latency = parsed("SIMULATED_LATENCY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.simulated_latency);
        let backend_timeout = parsed("BACKEND_TIMEOUT_SECONDS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.backend_timeout);
        let mock_profile_store_fail =
            parsed("MOCK_PROFILE_STORE_FAIL").unwrap_or(defaults.mock_profile_store_fail);
        let demo_login_email =
            env::var("DEMO_LOGIN_EMAIL").unwrap_or(defaults.demo_login_email);

        // Screens
        let success_notice_duration = parsed("SUCCESS_NOTICE_SECONDS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.success_notice_duration);
        let max_request_body_bytes =
            parsed("MAX_REQUEST_BODY_BYTES").unwrap_or(defaults.max_request_body_bytes);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            simulated_latency,
            backend_timeout,
            mock_profile_store_fail,
            demo_login_email,
            success_notice_duration,
            max_request_body_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_defaults_to_dev() {
        assert_eq!(Environment::parse("Production"), Environment::Prod);
        assert_eq!(Environment::parse("staging"), Environment::Staging);
        assert_eq!(Environment::parse("whatever"), Environment::Dev);
        assert!(Environment::parse("").is_dev());
    }

    #[test]
    fn defaults_match_the_screens() {
        let settings = Settings::default();
        assert_eq!(settings.success_notice_duration, Duration::from_secs(3));
        assert_eq!(settings.simulated_latency, Duration::from_millis(1500));
        assert!(settings.max_request_body_bytes > 5 * 1024 * 1024);
    }
}
