//! Configuration management
//!
//! Settings come from an optional TOML file, then the environment, then CLI
//! flags, each overriding the previous.

use anyhow::{bail, Context, Result};
use frameguide_frame::render::{DEFAULT_INFOGRAPHIC_PATH, DEFAULT_POST_PATH, DEFAULT_TITLE};
use frameguide_frame::Renderer;
use frameguide_web::ServerSettings;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use url::Url;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "frameguide.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub frame: FrameConfig,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Frame rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Public base URL (defaults to http://localhost:{port})
    pub base_url: Option<String>,

    /// Document and og:title
    #[serde(default = "default_title")]
    pub title: String,

    /// Directory served for page images and the infographic
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,

    /// Path the root URL redirects to
    #[serde(default = "default_infographic_path")]
    pub infographic_path: String,
}

// Default value functions
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }
fn default_title() -> String { DEFAULT_TITLE.to_string() }
fn default_public_dir() -> PathBuf { PathBuf::from("public") }
fn default_infographic_path() -> String { DEFAULT_INFOGRAPHIC_PATH.to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            title: default_title(),
            public_dir: default_public_dir(),
            infographic_path: default_infographic_path(),
        }
    }
}

/// Environment variables that affect configuration
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `FRAMEGUIDE_BASE_URL`, used verbatim
    pub base_url: Option<String>,

    /// `VERCEL_URL`, a bare deployment host
    pub vercel_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            base_url: read("FRAMEGUIDE_BASE_URL"),
            vercel_url: read("VERCEL_URL"),
        }
    }
}

/// Flags given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub base_url: Option<String>,
    pub public_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load the given file, or `frameguide.toml` if present, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Apply command line flags on top of the file values
    pub fn apply_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(host) = cli.host {
            self.server.host = host;
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(base_url) = cli.base_url {
            self.frame.base_url = Some(base_url);
        }
        if let Some(public_dir) = cli.public_dir {
            self.frame.public_dir = public_dir;
        }
        self
    }

    /// Resolve the public base URL
    ///
    /// An explicit `base_url` from the CLI wins, then `FRAMEGUIDE_BASE_URL`,
    /// then `VERCEL_URL` (served over https), then the file value, then localhost.
    pub fn resolve_base_url(&self, cli_base_url: Option<&str>, env: &EnvOverrides) -> Result<String> {
        let raw = if let Some(url) = cli_base_url {
            url.to_string()
        } else if let Some(url) = &env.base_url {
            url.clone()
        } else if let Some(host) = &env.vercel_url {
            if host.starts_with("http://") || host.starts_with("https://") {
                host.clone()
            } else {
                format!("https://{}", host)
            }
        } else if let Some(url) = &self.frame.base_url {
            url.clone()
        } else {
            format!("http://localhost:{}", self.server.port)
        };

        normalize_base_url(&raw)
    }

    /// Frame renderer for these settings
    pub fn renderer(&self) -> Renderer {
        Renderer {
            title: self.frame.title.clone(),
            post_path: DEFAULT_POST_PATH.to_string(),
            infographic_path: self.frame.infographic_path.clone(),
        }
    }

    /// Build server settings from file, environment and CLI flags
    pub fn server_settings(self, cli: CliOverrides, env: &EnvOverrides) -> Result<ServerSettings> {
        let cli_base_url = cli.base_url.clone();
        let config = self.apply_cli(cli);

        let base_url = config.resolve_base_url(cli_base_url.as_deref(), env)?;
        let host: IpAddr = config
            .server
            .host
            .parse()
            .with_context(|| format!("Invalid listen address '{}'", config.server.host))?;

        Ok(ServerSettings {
            host,
            port: config.server.port,
            base_url,
            renderer: config.renderer(),
            public_dir: config.frame.public_dir,
        })
    }
}

/// Check that a base URL is absolute http(s) and strip trailing slashes
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("Invalid base URL '{}'", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => bail!("Base URL '{}' must use http or https, not {}", raw, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.frame.title, DEFAULT_TITLE);
        assert_eq!(config.frame.public_dir, PathBuf::from("public"));
        assert_eq!(config.frame.infographic_path, "/infographic.html");
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [server]
            port = 8080

            [frame]
            base_url = "https://guide.example/"
            title = "Guide"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.frame.title, "Guide");
        assert_eq!(
            config.resolve_base_url(None, &EnvOverrides::default()).unwrap(),
            "https://guide.example"
        );
    }

    #[test]
    fn test_malformed_file() {
        assert!(Config::from_toml("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_base_url_falls_back_to_localhost() {
        let config = Config::default();
        assert_eq!(
            config.resolve_base_url(None, &EnvOverrides::default()).unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_vercel_host_gets_https() {
        let env = EnvOverrides {
            base_url: None,
            vercel_url: Some("guide-abc123.vercel.app".to_string()),
        };
        assert_eq!(
            Config::default().resolve_base_url(None, &env).unwrap(),
            "https://guide-abc123.vercel.app"
        );
    }

    #[test]
    fn test_base_url_precedence() {
        let mut config = Config::default();
        config.frame.base_url = Some("https://file.example".to_string());
        let env = EnvOverrides {
            base_url: Some("https://env.example".to_string()),
            vercel_url: Some("vercel.example".to_string()),
        };

        assert_eq!(config.resolve_base_url(None, &env).unwrap(), "https://env.example");
        assert_eq!(
            config.resolve_base_url(Some("https://cli.example"), &env).unwrap(),
            "https://cli.example"
        );
        assert_eq!(
            config.resolve_base_url(None, &EnvOverrides::default()).unwrap(),
            "https://file.example"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(normalize_base_url("guide.example").is_err());
        assert!(normalize_base_url("ftp://guide.example").is_err());
        assert_eq!(normalize_base_url(" https://a.example// ").unwrap(), "https://a.example");
    }

    #[test]
    fn test_server_settings_apply_cli() {
        let cli = CliOverrides {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            base_url: None,
            public_dir: Some(PathBuf::from("/srv/guide")),
        };
        let settings = Config::default()
            .server_settings(cli, &EnvOverrides::default())
            .unwrap();
        assert_eq!(settings.host.to_string(), "0.0.0.0");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.base_url, "http://localhost:9000");
        assert_eq!(settings.public_dir, PathBuf::from("/srv/guide"));
        assert_eq!(settings.renderer.infographic_path, "/infographic.html");
    }

    #[test]
    fn test_server_settings_rejects_bad_host() {
        let cli = CliOverrides {
            host: Some("not-an-ip".to_string()),
            ..CliOverrides::default()
        };
        assert!(Config::default()
            .server_settings(cli, &EnvOverrides::default())
            .is_err());
    }
}
