use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result as AppResult};

pub const DEFAULT_CREEM_BASE_URL: &str = "https://api.creem.io";
pub const DEFAULT_APP_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub creem: CreemConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CreemConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// 支付完成/取消后浏览器回跳的前端地址
    pub app_url: String,
    pub mock_mode: bool,
    pub webhook_secret: Option<String>,
    pub timeout_ms: u64,
}

impl Default for CreemConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_CREEM_BASE_URL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            mock_mode: false,
            webhook_secret: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Empty list (or a literal `*`) means any origin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_wildcard(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTimezone {
    #[default]
    Utc,
    Beijing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    pub level: String,
    pub timezone: LogTimezone,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: LogTimezone::Utc,
        }
    }
}

impl Settings {
    /// 读取配置文件（可选）后叠加环境变量
    pub fn load() -> AppResult<Self> {
        let mut settings = match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path)?,
            None => Settings::default(),
        };
        settings.apply_env(|name| std::env::var(name).ok());
        Ok(settings)
    }

    pub fn load_from_path(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("invalid config {}: {}", path.display(), e)))
    }

    fn find_config_file() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var("GATEWAY_CONFIG").ok().filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(explicit));
        }

        ["custom-config.toml", "config.toml"]
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    /// Overlay environment values; `lookup` stands in for `std::env::var`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("CREEM_API_KEY") {
            self.creem.api_key = Some(key);
        }
        if let Some(url) = get("CREEM_API_BASE_URL") {
            self.creem.base_url = url;
        }
        if let Some(flag) = get("CREEM_MOCK_MODE") {
            // 仅当明确为 "true" 时启用
            self.creem.mock_mode = flag == "true";
        }
        if let Some(url) = get("VITE_APP_URL").or_else(|| get("NEXT_PUBLIC_APP_URL")) {
            self.creem.app_url = url;
        }
        if let Some(secret) = get("CREEM_WEBHOOK_SECRET") {
            self.creem.webhook_secret = Some(secret);
        }
        if let Some(ms) = get("CREEM_TIMEOUT_MS").and_then(|v| v.trim().parse::<u64>().ok()) {
            self.creem.timeout_ms = ms;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT").and_then(|v| v.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(raw) = get("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = raw
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect();
        }

        self.creem.base_url = self.creem.base_url.trim_end_matches('/').to_string();
        self.creem.app_url = self.creem.app_url.trim_end_matches('/').to_string();
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_any_source() {
        let mut s = Settings::default();
        s.apply_env(env_of(&[]));
        assert_eq!(s.creem.base_url, "https://api.creem.io");
        assert_eq!(s.creem.app_url, DEFAULT_APP_URL);
        assert_eq!(s.creem.api_key, None);
        assert!(!s.creem.mock_mode);
        assert_eq!(s.creem.timeout_ms, 10_000);
        assert_eq!(s.bind_addr(), "0.0.0.0:8787");
        assert!(s.cors.is_wildcard());
    }

    #[test]
    fn primary_app_url_wins_over_alias() {
        let mut s = Settings::default();
        s.apply_env(env_of(&[
            ("VITE_APP_URL", "https://studio.example/"),
            ("NEXT_PUBLIC_APP_URL", "https://alias.example"),
        ]));
        assert_eq!(s.creem.app_url, "https://studio.example");
    }

    #[test]
    fn alias_app_url_used_when_primary_missing_or_empty() {
        let mut s = Settings::default();
        s.apply_env(env_of(&[
            ("VITE_APP_URL", ""),
            ("NEXT_PUBLIC_APP_URL", "https://alias.example"),
        ]));
        assert_eq!(s.creem.app_url, "https://alias.example");
    }

    #[test]
    fn mock_mode_requires_literal_true() {
        for (raw, expected) in [("true", true), ("TRUE", false), ("1", false), ("yes", false)] {
            let mut s = Settings::default();
            s.apply_env(env_of(&[("CREEM_MOCK_MODE", raw)]));
            assert_eq!(s.creem.mock_mode, expected, "CREEM_MOCK_MODE={raw}");
        }
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let mut s = Settings::default();
        s.apply_env(env_of(&[(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:8080, http://127.0.0.1:8080,,",
        )]));
        assert_eq!(
            s.cors.allowed_origins,
            vec!["http://localhost:8080", "http://127.0.0.1:8080"]
        );
        assert!(!s.cors.is_wildcard());
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[creem]
base_url = "https://test-api.creem.io/"
app_url = "https://from-file.example"
timeout_ms = 2500

[logging]
level = "debug"
timezone = "beijing"
"#
        )
        .unwrap();

        let mut s = Settings::load_from_path(&path).unwrap();
        assert_eq!(s.server.port, 9000);
        assert_eq!(s.logging.timezone, LogTimezone::Beijing);

        s.apply_env(env_of(&[("NEXT_PUBLIC_APP_URL", "https://from-env.example")]));
        assert_eq!(s.creem.base_url, "https://test-api.creem.io");
        assert_eq!(s.creem.app_url, "https://from-env.example");
        assert_eq!(s.creem.timeout_ms, 2500);
        assert!(!s.creem.mock_mode);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = Settings::load_from_path(&path).unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
