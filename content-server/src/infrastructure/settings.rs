use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub jwt_private_key_pem: String,
    pub jwt_public_key_pem: String,
    pub jwt_algorithm: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_minutes: i64,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_private_key_pem =
            get_required("JWT_PRIVATE_KEY_PEM").context("JWT_PRIVATE_KEY_PEM is required")?;
        let jwt_public_key_pem =
            get_required("JWT_PUBLIC_KEY_PEM").context("JWT_PUBLIC_KEY_PEM is required")?;
        let jwt_algorithm =
            std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "RS256".to_string());

        let access_token_ttl_minutes = parse_i64_env("ACCESS_TOKEN_TTL_MINUTES", 30)?;
        let refresh_token_ttl_minutes = parse_i64_env("REFRESH_TOKEN_TTL_MINUTES", 20160)?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            database_url,
            jwt_private_key_pem,
            jwt_public_key_pem,
            jwt_algorithm,
            access_token_ttl_minutes,
            refresh_token_ttl_minutes,
            http_addr,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_i64_env(key: &str, default: i64) -> Result<i64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<i64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value <= 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
