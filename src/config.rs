use color_eyre::eyre::{Result, WrapErr};

pub const DEFAULT_IP: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Process settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ip: String,
    pub port: u16,
    pub debug: bool,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the real environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ip = lookup("IP").unwrap_or_else(|| DEFAULT_IP.to_string());
        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .wrap_err_with(|| format!("PORT must be a port number, got {port:?}"))?,
            None => DEFAULT_PORT,
        };
        let debug = lookup("DEBUG").map_or(true, |value| parse_flag(&value));
        let sentry_dsn = lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());
        Ok(Self {
            ip,
            port,
            debug,
            sentry_dsn,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.ip, self.port)
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}
