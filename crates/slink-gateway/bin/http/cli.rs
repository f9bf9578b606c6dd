use clap::{Parser, ValueEnum};
use slink_gateway::telemetry::LogFormat;
use slink_generator::random::{DEFAULT_ID_BYTES, MAX_ID_BYTES};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SLINK_LISTEN_ADDR";
pub const DATABASE_URL_ENV: &str = "SLINK_DATABASE_URL";
pub const PUBLIC_BASE_URL_ENV: &str = "SLINK_PUBLIC_BASE_URL";
pub const ID_BYTES_ENV: &str = "SLINK_ID_BYTES";
pub const MAX_ID_ATTEMPTS_ENV: &str = "SLINK_MAX_ID_ATTEMPTS";
pub const LOG_FORMAT_ENV: &str = "SLINK_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "memory://";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

impl Display for LogFormatArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormatArg::Text => write!(f, "text"),
            LogFormatArg::Json => write!(f, "json"),
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "slink-gateway", about = "URL shortener HTTP gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// `memory://` for an in-process store, `redis://host:port/db` for Redis.
    #[arg(long, env = DATABASE_URL_ENV, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Prefix of the `short_url` field in responses.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    /// Random bytes per generated id, before base58 encoding.
    #[arg(
        long,
        env = ID_BYTES_ENV,
        default_value_t = DEFAULT_ID_BYTES as u64,
        value_parser = clap::value_parser!(u64).range(1..=MAX_ID_BYTES as u64)
    )]
    pub id_bytes: u64,

    #[arg(
        long,
        env = MAX_ID_ATTEMPTS_ENV,
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_id_attempts: u32,

    #[arg(
        long,
        env = LOG_FORMAT_ENV,
        value_enum,
        default_value_t = LogFormatArg::Text
    )]
    pub log_format: LogFormatArg,
}
