use std::{io, path::PathBuf};

use thiserror::Error;

pub mod config;
pub mod deck;
pub mod op;
pub mod resolve;
pub mod transform;

pub use config::{Config, ConfigError};
pub use modular::ModularError;
pub use op::{ParseError, ParseMode, ShuffleOp};
pub use resolve::{Resolution, resolve};
pub use transform::AffineTransform;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Modular(#[from] ModularError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Input { .. } => 2,
            Error::Parse(_) => 3,
            Error::Modular(_) => 4,
            Error::Config(_) => 5,
        }
    }
}

pub fn read_ops(path: PathBuf, mode: ParseMode) -> Result<Vec<ShuffleOp>, Error> {
    let input = std::fs::read_to_string(&path).map_err(|source| Error::Input { path, source })?;
    Ok(ShuffleOp::parse(&input, mode)?)
}
