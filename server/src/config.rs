use std::env;

const DEFAULT_DATABASE_URL: &str = "qa.db";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub session_key: Vec<u8>,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_address: lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.into()),
            session_key: auth::session_key(lookup("SESSION_KEY").as_deref()),
        }
    }
}
