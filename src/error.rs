//! Host error type.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use overlay::manifest::ManifestError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read manifest {}: {source}", .path.display())]
    ManifestRead { path: PathBuf, source: io::Error },
    #[error("invalid manifest {}: {source}", .path.display())]
    ManifestInvalid { path: PathBuf, source: ManifestError },
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),
}
