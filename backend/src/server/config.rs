//! Server settings loaded via OrthoConfig and the assembled server
//! configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Listener and persistence settings, read from `CHIRP_*` variables,
/// configuration files and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CHIRP")]
pub struct ServerSettings {
    /// Address to bind; defaults to all interfaces.
    pub host: Option<IpAddr>,
    /// Port to bind; defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool configuration when a non-blank database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        Some(PoolConfig::new(url).with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; repositories become Diesel-backed.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 5] = [
        "CHIRP_HOST",
        "CHIRP_PORT",
        "CHIRP_DATABASE_URL",
        "CHIRP_POOL_SIZE",
        "CHIRP_RUN_MIGRATIONS",
    ];

    fn load() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("chirp")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert!(settings.pool_config().is_none());
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CHIRP_HOST", Some("127.0.0.1".to_owned())),
            ("CHIRP_PORT", Some("9000".to_owned())),
            ("CHIRP_DATABASE_URL", Some("postgres://chirp@db/chirp".to_owned())),
            ("CHIRP_POOL_SIZE", Some("4".to_owned())),
            ("CHIRP_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 9000)));
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://chirp@db/chirp");
        assert_eq!(pool.max_size(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("CHIRP_HOST", None),
            ("CHIRP_PORT", None),
            ("CHIRP_DATABASE_URL", Some("   ".to_owned())),
            ("CHIRP_POOL_SIZE", None),
            ("CHIRP_RUN_MIGRATIONS", None),
        ]);

        assert!(load().pool_config().is_none());
    }
}
