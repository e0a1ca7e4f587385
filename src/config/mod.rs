use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Which record store backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Single-file SQLite database, survives restarts
    Sqlite,
    /// Process-local list, emptied on every restart
    Memory,
}

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Size of the connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Log every SQL statement
    #[serde(default)]
    pub echo_sql: bool,
}

fn default_database_url() -> String {
    "sqlite://./database.db".to_string()
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::Sqlite
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    5
}

/// Command line overrides, applied on top of the environment
#[derive(Debug, Default, clap::Parser)]
#[command(name = "project_registry", version, about = "Project registration API")]
pub struct Cli {
    /// SQLite database URL
    #[arg(long)]
    pub database_url: Option<String>,

    /// Record store backend
    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Log every SQL statement
    #[arg(long)]
    pub echo_sql: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replace environment values with whatever was given on the command line
    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(url) = cli.database_url {
            self.database_url = url;
        }
        if let Some(store) = cli.store {
            self.store_backend = store;
        }
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if cli.echo_sql {
            self.echo_sql = true;
        }
        self
    }
}

/// Initialize environment variables and load configuration
pub fn init(cli: Cli) -> Result<Config> {
    let config = Config::load()?;

    Ok(config.apply_cli(cli))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()));
        envy::from_iter::<_, Config>(vars).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]);
        assert_eq!(config.database_url(), "sqlite://./database.db");
        assert_eq!(config.store_backend, StoreBackend::Sqlite);
        assert_eq!(config.socket_addr(), "127.0.0.1:8000");
        assert_eq!(config.max_connections, 5);
        assert!(!config.echo_sql);
    }

    #[test]
    fn test_env_values() {
        let config = from_pairs(&[
            ("DATABASE_URL", "sqlite://./other.db"),
            ("STORE_BACKEND", "memory"),
            ("PORT", "9090"),
            ("ECHO_SQL", "true"),
        ]);
        assert_eq!(config.database_url(), "sqlite://./other.db");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.port, 9090);
        assert!(config.echo_sql);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = from_pairs(&[("PORT", "9090"), ("HOST", "0.0.0.0")]);
        let cli = Cli {
            port: Some(8080),
            store: Some(StoreBackend::Memory),
            ..Default::default()
        };
        let config = config.apply_cli(cli);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.store_backend, StoreBackend::Memory);
    }
}
