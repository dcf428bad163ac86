use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "SHORTCARD_LISTEN_ADDR";
pub const DATA_FILE_ENV: &str = "SHORTCARD_DATA_FILE";
pub const UPLOAD_DIR_ENV: &str = "SHORTCARD_UPLOAD_DIR";
pub const PUBLIC_HOST_ENV: &str = "SHORTCARD_PUBLIC_HOST";
pub const STORAGE_BACKEND_ENV: &str = "SHORTCARD_STORAGE_BACKEND";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_FILE: &str = "data/links.json";
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    /// Whole-file JSON array at the data file path.
    #[value(name = "json-file")]
    JsonFile,
    /// Process-local map; links die with the process.
    #[value(name = "in-memory")]
    InMemory,
    /// No storage at all; every link is a self-contained token.
    #[value(name = "stateless")]
    Stateless,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::JsonFile => write!(f, "json-file"),
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Stateless => write!(f, "stateless"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "shortcard-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = UPLOAD_DIR_ENV, default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// Publicly reachable host for absolute preview URLs. Overrides the
    /// request Host header when set.
    #[arg(long, env = PUBLIC_HOST_ENV)]
    pub public_host: Option<String>,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::JsonFile
    )]
    pub storage: StorageBackendArg,
}
