//! Runtime configuration
//!
//! Every option can be given on the command line or through a `TODO_*`
//! environment variable.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Deployment environment; production hides internal error messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Todo service - task tracking with deadlines over HTTP
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "TODO_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Path to the TOML data file; records are kept in memory when omitted
    #[arg(long, env = "TODO_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Deployment environment
    #[arg(long = "env", env = "TODO_ENV", value_enum, default_value_t = Environment::Development)]
    pub environment: Environment,

    /// Page size used when a list request has no valid limit
    #[arg(long, env = "TODO_DEFAULT_LIMIT", default_value_t = crate::todo::DEFAULT_LIMIT)]
    pub default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: None,
            environment: Environment::Development,
            default_limit: crate::todo::DEFAULT_LIMIT,
        }
    }
}
