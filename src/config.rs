use crate::error::Error;

pub static DATABASE_URL: &str = "DATABASE_URL";
pub static UPLOAD_PATH: &str = "UPLOAD_PATH";
pub static JWT_SECRET: &str = "JWT_SECRET";
pub static BIND_ADDR: &str = "BIND_ADDR";
pub static PUBLIC_URL: &str = "PUBLIC_URL";
pub static DB_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:8000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Process configuration read from the environment (and `.env`, via dotenv).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_path: String,
    pub jwt_secret: Vec<u8>,
    pub bind_addr: String,
    pub public_url: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| Error::ConfigError(format!("environment variable {} not been set", key)));
        let db_max_connections = match lookup(DB_MAX_CONNECTIONS) {
            Some(v) => v.parse()?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };
        Ok(Self {
            database_url: required(DATABASE_URL)?,
            upload_path: required(UPLOAD_PATH)?,
            jwt_secret: required(JWT_SECRET)?.into_bytes(),
            bind_addr: lookup(BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            public_url: lookup(PUBLIC_URL).unwrap_or_else(|| DEFAULT_PUBLIC_URL.into()).trim_end_matches('/').to_owned(),
            db_max_connections,
        })
    }
}
