use std::env;
use std::io;
use std::str::FromStr;

/// Process settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub public_dir: String,
    pub index_file: String,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> io::Result<Self> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: parse_or(&lookup, "PORT", 3000)?,
            workers: parse_or(&lookup, "WORKERS", num_cpus::get())?,
            public_dir: text("PUBLIC_DIR", "public"),
            index_file: text("INDEX_FILE", "views/index.html"),
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> io::Result<T> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("{} must be a number, got {:?}", key, raw))
        }),
        None => Ok(default),
    }
}
