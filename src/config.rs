use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

/// Which `Store` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreKind::Postgres),
            "memory" | "mem" => Ok(StoreKind::Memory),
            other => anyhow::bail!("unknown STORE value: {other}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't touch process env.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup("STORE") {
            Some(v) => v.parse::<StoreKind>()?,
            None => StoreKind::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            anyhow::bail!("DATABASE_URL must be set when STORE=postgres");
        }

        let secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .context("JWT_SECRET must be set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("invalid APP_PORT: {v}"))?,
            None => 3000,
        };

        Ok(Self {
            store,
            database_url,
            max_connections,
            jwt: JwtConfig { secret },
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/gitopsnow"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .expect("config should load");

        assert_eq!(cfg.store, StoreKind::Postgres);
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.jwt.secret, "s3cret");
    }

    #[test]
    fn missing_jwt_secret_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/gitopsnow",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn postgres_store_requires_database_url() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "x")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_store_needs_no_database_url() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("STORE", "memory"),
            ("JWT_SECRET", "x"),
            ("APP_PORT", "8081"),
        ]))
        .expect("config should load");
        assert_eq!(cfg.store, StoreKind::Memory);
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.port, 8081);
    }

    #[test]
    fn rejects_unknown_store_kind() {
        assert!(AppConfig::from_lookup(lookup_from(&[
            ("STORE", "redis"),
            ("JWT_SECRET", "x"),
        ]))
        .is_err());
    }
}
