use std::env;

use crate::queues::QueueVariant;

// --- CONFIG AGGREGATOR ---

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub bull: BullConfig,
    pub auth: AuthConfig,
}

impl Config {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            server: ServerConfig::load(),
            redis: RedisConfig::load(),
            bull: BullConfig::load(),
            auth: AuthConfig::load(),
        }
    }
}

// --- MODULES ---

// SERVER
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub home_page: String,
    pub login_page: String,
    pub log_level: String,
}

impl ServerConfig {
    fn load() -> Self {
        Self {
            host:       get_env("SERVER_HOST", "0.0.0.0"),
            port:       get_env("PORT", "3000"),
            home_page:  normalize_path(get_env("HOME_PAGE", "/")),
            login_page: normalize_path(get_env("LOGIN_PAGE", "/login")),
            log_level:  get_env("QBOARD_LOG", "info"),
        }
    }
}

// REDIS
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
}

impl RedisConfig {
    fn load() -> Self {
        Self {
            host:     get_env("REDIS_HOST", "localhost"),
            port:     get_env("REDIS_PORT", "6379"),
            password: env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()),
            db:       get_env("REDIS_DB", "0"),
        }
    }
}

// BULL
#[derive(Debug, Clone)]
pub struct BullConfig {
    /// Namespace the external queue libraries write their keys under.
    pub prefix: String,
    /// Which queue library wrote those keys. Selected once, globally.
    pub variant: QueueVariant,
}

impl BullConfig {
    fn load() -> Self {
        let version: String = get_env("BULL_VERSION", "BULL");
        Self {
            prefix:  get_env("BULL_PREFIX", "bull"),
            variant: QueueVariant::from_version(&version),
        }
    }
}

// AUTH
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    pub username: String,
    pub password: String,
    pub session_ttl_secs: u64,
}

impl AuthConfig {
    fn load() -> Self {
        Self {
            enabled:          get_env_flag("AUTH_ENABLED"),
            username:         get_env("USER_LOGIN", "admin"),
            password:         get_env("USER_PASSWORD", "admin"),
            session_ttl_secs: get_env("SESSION_TTL_SECS", "86400"),
        }
    }
}

// --- PRIVATE HELPERS ---

fn get_env<T: std::str::FromStr>(key: &str, default: &str) -> T {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Config error: {} must be valid", key))
        .unwrap()
}

fn get_env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Mount paths always start with '/' and never end with one (except "/").
fn normalize_path(raw: String) -> String {
    let mut path = raw.trim().to_string();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn normalize_path_adds_leading_slash() {
        assert_eq!(normalize_path("board".to_string()), "/board");
    }

    #[test]
    fn normalize_path_strips_trailing_slashes() {
        assert_eq!(normalize_path("/board/".to_string()), "/board");
        assert_eq!(normalize_path("/board///".to_string()), "/board");
    }

    #[test]
    fn normalize_path_keeps_root() {
        assert_eq!(normalize_path("/".to_string()), "/");
    }
}
