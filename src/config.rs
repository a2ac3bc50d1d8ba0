//! Server configuration read from `PORTFOLIO_*` environment variables.

use crate::accounts::{Account, AccountDirectory};
use crate::model::AccountId;
use std::net::IpAddr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

fn invalid(name: &'static str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        name,
        message: message.into(),
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub http_host: IpAddr,
    pub http_port: u16,
    /// Common path prefix of every resource, without a trailing slash.
    pub api_prefix: String,
    /// URL prefix of uploaded media. A path, or an absolute URL for an external host.
    pub media_url: String,
    /// Scheme used for absolute links when `X-Forwarded-Proto` is absent.
    pub public_scheme: String,
    pub accounts: Vec<Account>,
    /// Route `/technologies/`. Off by default.
    pub expose_technologies: bool,
    /// Empty disables CORS, `["*"]` allows any origin.
    pub cors_allowed_origins: Vec<String>,
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: IpAddr::from([0, 0, 0, 0]),
            http_port: 8000,
            api_prefix: "/api/v1".to_string(),
            media_url: "/media/".to_string(),
            public_scheme: "http".to_string(),
            accounts: Vec::new(),
            expose_technologies: false,
            cors_allowed_origins: Vec::new(),
            actor_buffer: 32,
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);
        let mut config = Self::default();

        if let Some(host) = env.string("PORTFOLIO_HTTP_HOST") {
            config.http_host = host
                .parse()
                .map_err(|e| invalid("PORTFOLIO_HTTP_HOST", format!("must be an IP address: {e}")))?;
        }
        if let Some(port) = env.parse::<u16>("PORTFOLIO_HTTP_PORT")? {
            config.http_port = port;
        }
        if let Some(prefix) = env.string("PORTFOLIO_API_PREFIX") {
            config.api_prefix = normalize_prefix(&prefix);
        }
        if let Some(media_url) = env.string("PORTFOLIO_MEDIA_URL") {
            config.media_url = media_url;
        }
        if let Some(scheme) = env.string("PORTFOLIO_PUBLIC_SCHEME") {
            config.public_scheme = match scheme.to_ascii_lowercase().as_str() {
                s @ ("http" | "https") => s.to_string(),
                _ => return Err(invalid("PORTFOLIO_PUBLIC_SCHEME", "must be http or https")),
            };
        }

        match (
            env.string("PORTFOLIO_ADMIN_USERNAME"),
            env.string("PORTFOLIO_ADMIN_PASSWORD"),
        ) {
            (Some(username), Some(password)) => {
                config.accounts.push(Account::new(AccountId(1), username, password));
            }
            (None, None) => {}
            _ => {
                return Err(invalid(
                    "PORTFOLIO_ADMIN_USERNAME",
                    "username and PORTFOLIO_ADMIN_PASSWORD must be set together",
                ))
            }
        }
        if let Some(accounts) = env.string("PORTFOLIO_ACCOUNTS") {
            for entry in accounts.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let account: Account = entry
                    .parse()
                    .map_err(|e| invalid("PORTFOLIO_ACCOUNTS", format!("{e}")))?;
                if config.accounts.iter().any(|a| a.id == account.id) {
                    return Err(invalid(
                        "PORTFOLIO_ACCOUNTS",
                        format!("duplicate account id {}", account.id.0),
                    ));
                }
                config.accounts.push(account);
            }
        }

        if let Some(expose) = env.boolean("PORTFOLIO_EXPOSE_TECHNOLOGIES")? {
            config.expose_technologies = expose;
        }
        if let Some(origins) = env.string("PORTFOLIO_CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = parse_cors_allowed_origins(&origins);
        }
        if let Some(buffer) = env.parse::<usize>("PORTFOLIO_ACTOR_BUFFER")? {
            if buffer == 0 {
                return Err(invalid("PORTFOLIO_ACTOR_BUFFER", "must be at least 1"));
            }
            config.actor_buffer = buffer;
        }
        if let Some(format) = env.string("PORTFOLIO_LOG_FORMAT") {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                _ => return Err(invalid("PORTFOLIO_LOG_FORMAT", "must be compact or json")),
            };
        }

        Ok(config)
    }

    pub fn account_directory(&self) -> AccountDirectory {
        AccountDirectory::new(self.accounts.clone())
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn string(&self, name: &str) -> Option<String> {
        (self.0)(name).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse<T>(&self, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let Some(v) = self.string(name) else {
            return Ok(None);
        };
        v.parse::<T>()
            .map(Some)
            .map_err(|e| invalid(name, format!("{e}")))
    }

    fn boolean(&self, name: &'static str) -> Result<Option<bool>, ConfigError> {
        let Some(v) = self.string(name) else {
            return Ok(None);
        };
        match v.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(Some(true)),
            "false" | "0" | "no" | "n" => Ok(Some(false)),
            _ => Err(invalid(name, "must be a boolean (true/false/1/0)")),
        }
    }
}

/// Leading slash, no trailing slash. `/` becomes the empty prefix.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_cors_allowed_origins(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    if trimmed == "*" {
        return vec!["*".to_string()];
    }
    trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
