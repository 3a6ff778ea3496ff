use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Built once at startup and shared read-only through `AppState`.
/// All fields except the database URL and JWT secret have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Accepted `Host` header values. Empty means any host.
    pub allowed_hosts: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted request body, uploads included (default: 10 MiB).
    pub max_upload_bytes: usize,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Local media storage settings.
    pub media: MediaConfig,
}

/// Where uploaded files live on disk and the URL prefix they are served at.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub url_prefix: String,
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `ALLOWED_HOSTS`        | (empty: any host)          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `10485760`                 |
    /// | `MEDIA_ROOT`           | `media`                    |
    /// | `MEDIA_URL`            | `/media`                   |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers or a `MEDIA_URL` that does not start
    /// with `/`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let allowed_hosts = parse_list(&std::env::var("ALLOWED_HOSTS").unwrap_or_default());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let root = PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into()));
        let url_prefix = normalize_url_prefix(
            &std::env::var("MEDIA_URL").unwrap_or_else(|_| "/media".into()),
        );
        assert!(url_prefix.starts_with('/'), "MEDIA_URL must start with '/'");

        Self {
            host,
            port,
            cors_origins,
            allowed_hosts,
            request_timeout_secs,
            max_upload_bytes,
            jwt: JwtConfig::from_env(),
            media: MediaConfig { root, url_prefix },
        }
    }
}

/// Split a comma-separated env value, trimming blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn normalize_url_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" a.example.com, ,b.example.com ,"),
            vec!["a.example.com".to_string(), "b.example.com".to_string()]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn url_prefix_loses_trailing_slash() {
        assert_eq!(normalize_url_prefix("/media/"), "/media");
        assert_eq!(normalize_url_prefix("/media"), "/media");
        assert_eq!(normalize_url_prefix("/"), "/");
    }
}
