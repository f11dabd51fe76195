use argon2::Params;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Argon2 work factor. Defaults to the argon2 crate's recommended params.
#[derive(Debug, Clone, Deserialize)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
    pub frontend_url: String,
}

pub const DEFAULT_TTL_MINUTES: i64 = 30;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_minutes: env_or("JWT_TTL_MINUTES", DEFAULT_TTL_MINUTES),
        };
        anyhow::ensure!(!jwt.secret.is_empty(), "JWT_SECRET must not be empty");
        anyhow::ensure!(jwt.ttl_minutes > 0, "JWT_TTL_MINUTES must be positive");

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: env_or("ARGON2_M_COST", defaults.memory_kib),
            iterations: env_or("ARGON2_T_COST", defaults.iterations),
            parallelism: env_or("ARGON2_P_COST", defaults.parallelism),
        };

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into());

        Ok(Self {
            database_url,
            jwt,
            hashing,
            frontend_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_defaults_match_argon2() {
        let cfg = HashingConfig::default();
        assert_eq!(cfg.memory_kib, Params::DEFAULT_M_COST);
        assert_eq!(cfg.iterations, Params::DEFAULT_T_COST);
        assert_eq!(cfg.parallelism, Params::DEFAULT_P_COST);
    }

    #[test]
    fn env_or_falls_back_on_missing_or_garbage() {
        std::env::set_var("BLOG_API_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("BLOG_API_TEST_GARBAGE", 30i64), 30);
        assert_eq!(env_or("BLOG_API_TEST_UNSET_VAR", 7u32), 7);
    }
}
