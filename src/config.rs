// ABOUTME: Command line and environment configuration for the catalog server
// ABOUTME: Every flag can also be supplied through its environment variable

use clap::Parser;

/// Star Wars catalog API command line arguments.
#[derive(Debug, Parser)]
#[command(name = "starwars_catalog")]
#[command(about = "HTTP/JSON catalog of Star Wars users, characters, planets and favorites")]
pub struct Args {
    /// Database URL (sqlite: or postgres://).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:starwars.db?mode=rwc")]
    pub database_url: String,

    /// Address to listen on for HTTP requests.
    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:3000")]
    pub listen: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// Do not run schema migrations at startup.
    #[arg(long)]
    pub skip_migrations: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            database_url: args.database_url.clone(),
            listen_addr: args.listen.clone(),
            max_connections: args.max_connections,
            run_migrations: !args.skip_migrations,
        }
    }
}

impl Config {
    /// Configuration for a SQLite file, used by tests.
    #[cfg(test)]
    pub fn sqlite(path: &std::path::Path) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.display()),
            listen_addr: "127.0.0.1:0".to_string(),
            max_connections: 5,
            run_migrations: true,
        }
    }
}
