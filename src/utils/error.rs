use std::ffi::NulError;
use std::io;
use thiserror::Error;

use crate::shader::program::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to compile {stage} shader: {log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("Program linking failed: {log}")]
    Linking { log: String },

    #[error("Null byte in shader source: {0}")]
    Nul(#[from] NulError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ShaderError>;
