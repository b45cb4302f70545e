//! Service Configuration
//!
//! Every setting is a command line flag that can also be supplied through an
//! environment variable, so the binary runs unchanged from a shell or a container.

use crate::oracles::remote::RemoteSettings;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleBackend {
    /// In-process lexicon and TF-IDF oracles.
    Local,
    /// Hosted models behind an inference HTTP endpoint.
    Remote,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "gita-advisor", about = "Bhagavad Gita verse recommendation service")]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "GITA_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// JSON export of the verse spreadsheet.
    #[arg(long, env = "GITA_DATA_PATH", default_value = "data/verses.json")]
    pub data_path: PathBuf,

    #[arg(long, env = "GITA_ORACLE_BACKEND", value_enum, default_value_t = OracleBackend::Local)]
    pub oracle_backend: OracleBackend,

    #[arg(
        long,
        env = "GITA_INFERENCE_URL",
        default_value = "https://api-inference.huggingface.co/models"
    )]
    pub inference_url: String,

    #[arg(
        long,
        env = "GITA_EMOTION_MODEL",
        default_value = "j-hartmann/emotion-english-distilroberta-base"
    )]
    pub emotion_model: String,

    #[arg(
        long,
        env = "GITA_SIMILARITY_MODEL",
        default_value = "sentence-transformers/all-mpnet-base-v2"
    )]
    pub similarity_model: String,

    #[arg(long, env = "HF_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Per-request timeout for remote oracles.
    #[arg(long, env = "GITA_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(
        long,
        env = "GITA_RETRY_ATTEMPTS",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub retry_attempts: u32,

    /// Log at DEBUG instead of INFO.
    #[arg(long, env = "GITA_VERBOSE")]
    pub verbose: bool,
}

impl Config {
    pub fn remote_settings(&self) -> RemoteSettings {
        RemoteSettings {
            base_url: self.inference_url.clone(),
            emotion_model: self.emotion_model.clone(),
            similarity_model: self.similarity_model.clone(),
            api_token: self.api_token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            attempts: self.retry_attempts as usize,
        }
    }
}

#[cfg(test)]
mod tests;
