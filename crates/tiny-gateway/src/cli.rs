use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tiny_generator::DEFAULT_ID_LEN;
use tiny_shortener::ShortenerSettings;

use crate::auth::Authorizer;

pub const LISTEN_ADDR_ENV: &str = "TINY_LISTEN_ADDR";
pub const FILE_BACKEND_ENV: &str = "TINY_FILE_BACKEND";
pub const ID_LEN_ENV: &str = "TINY_ID_LEN";
pub const MAX_ID_ATTEMPTS_ENV: &str = "TINY_MAX_ID_ATTEMPTS";
pub const READ_TOKEN_ENV: &str = "TINY_READ_TOKEN";
pub const WRITE_TOKEN_ENV: &str = "TINY_WRITE_TOKEN";
pub const ALLOW_PUBLIC_CREATE_ENV: &str = "TINY_ALLOW_PUBLIC_CREATE";
pub const PRETTY_JSON_ENV: &str = "TINY_PRETTY_JSON";
pub const VERBOSE_ENV: &str = "TINY_VERBOSE";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_FILE_BACKEND: &str = "./backend.json";

#[derive(Debug, Parser)]
#[command(name = "tiny", about = "A small URL shortener backed by a JSON file")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Path of the JSON file holding the entries.
    #[arg(long, env = FILE_BACKEND_ENV, default_value = DEFAULT_FILE_BACKEND)]
    pub file_backend: PathBuf,

    /// Length of generated ids.
    #[arg(long, env = ID_LEN_ENV, default_value_t = DEFAULT_ID_LEN)]
    pub id_len: usize,

    /// Give up generating an id after this many collisions. Unbounded when unset.
    #[arg(long, env = MAX_ID_ATTEMPTS_ENV)]
    pub max_id_attempts: Option<usize>,

    /// Bearer token required for listing and expanding entries.
    #[arg(long, env = READ_TOKEN_ENV, default_value = "", hide_env_values = true)]
    pub read_token: String,

    /// Bearer token required for creating, updating and deleting entries.
    #[arg(long, env = WRITE_TOKEN_ENV, default_value = "", hide_env_values = true)]
    pub write_token: String,

    /// Allow creating entries with generated ids without the write token.
    #[arg(long, env = ALLOW_PUBLIC_CREATE_ENV)]
    pub allow_public_create: bool,

    /// Tab-indent JSON responses.
    #[arg(long, env = PRETTY_JSON_ENV)]
    pub pretty_json: bool,

    #[arg(short, long, env = VERBOSE_ENV)]
    pub verbose: bool,
}

impl Cli {
    pub fn authorizer(&self) -> Authorizer {
        Authorizer::builder()
            .read_token(self.read_token.clone())
            .write_token(self.write_token.clone())
            .allow_public_create(self.allow_public_create)
            .build()
    }

    pub fn shortener_settings(&self) -> ShortenerSettings {
        ShortenerSettings::builder()
            .pretty_json(self.pretty_json)
            .max_id_attempts(self.max_id_attempts)
            .build()
    }
}
