use std::net::SocketAddr;
use std::path::PathBuf;

use tower_cookies::Key;

use crate::error::{Error, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://books.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Everything the server needs at startup, read once and passed down.
#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub bind_addr: SocketAddr,
	pub max_connections: u32,
	/// Signs the flash cookie. Must be at least 64 bytes; random when unset.
	pub secret_key: Option<String>,
	pub static_dir: PathBuf,
}

impl Config {
	/// Read the process environment, after loading `.env` if there is one.
	pub fn from_env() -> Result<Self> {
		if let Err(e) = dotenvy::dotenv() {
			if !e.not_found() {
				return Err(Error::Config(format!(".env: {e}")));
			}
		}
		Config::from_lookup(|name| std::env::var(name).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let database_url = lookup("DATABASE_URL")
			.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

		let bind_addr = lookup("BIND_ADDR")
			.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
		let bind_addr = bind_addr.parse::<SocketAddr>()
			.map_err(|e| Error::Config(format!("BIND_ADDR {bind_addr:?}: {e}")))?;

		let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
			Some(raw) => match raw.parse::<u32>() {
				Ok(0) | Err(_) => {
					return Err(Error::Config(format!(
						"DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}"
					)))
				},
				Ok(n) => n,
			},
			None => DEFAULT_MAX_CONNECTIONS,
		};

		let secret_key = lookup("SECRET_KEY").filter(|k| !k.is_empty());

		let static_dir = lookup("STATIC_DIR")
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

		let config = Config {
			database_url,
			bind_addr,
			max_connections,
			secret_key,
			static_dir,
		};
		// fail on a short key now rather than at the first request
		config.cookie_key()?;
		Ok(config)
	}

	pub fn cookie_key(&self) -> Result<Key> {
		match &self.secret_key {
			Some(secret) => Key::try_from(secret.as_bytes())
				.map_err(|e| Error::Config(format!("SECRET_KEY: {e}"))),
			None => Ok(Key::generate()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| vars.get(name).cloned()
	}

	#[test]
	fn defaults_when_unset() {
		let config = Config::from_lookup(lookup(&[])).unwrap();
		assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
		assert_eq!(config.bind_addr.port(), 8080);
		assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
		assert!(config.secret_key.is_none());
		assert_eq!(config.static_dir, PathBuf::from("static"));
	}

	#[test]
	fn reads_overrides() {
		let key = "k".repeat(64);
		let config = Config::from_lookup(lookup(&[
			("DATABASE_URL", "sqlite://other.db"),
			("BIND_ADDR", "127.0.0.1:3000"),
			("DATABASE_MAX_CONNECTIONS", "2"),
			("SECRET_KEY", key.as_str()),
			("STATIC_DIR", "/srv/assets"),
		])).unwrap();
		assert_eq!(config.database_url, "sqlite://other.db");
		assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
		assert_eq!(config.max_connections, 2);
		assert_eq!(config.secret_key.as_deref(), Some(key.as_str()));
		assert_eq!(config.static_dir, PathBuf::from("/srv/assets"));
	}

	#[test]
	fn rejects_bad_bind_addr() {
		let err = Config::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn rejects_zero_connections() {
		let err = Config::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}

	#[test]
	fn rejects_short_secret() {
		let err = Config::from_lookup(lookup(&[("SECRET_KEY", "personal-library")])).unwrap_err();
		assert!(matches!(err, Error::Config(_)));
	}
}
