use std::io;
use std::path::PathBuf;

/// Errors raised while loading rules or patching workflow files.
///
/// A rewrite pattern that finds nothing is never an error; only I/O and
/// configuration problems surface here.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("failed to read workflow {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write workflow {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to list workflow directory {}: {source}", .path.display())]
    ScanDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PatchError {
    /// Path of the file involved, when the error concerns one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            PatchError::Read { path, .. }
            | PatchError::Write { path, .. }
            | PatchError::ScanDir { path, .. }
            | PatchError::ConfigRead { path, .. }
            | PatchError::ConfigParse { path, .. } => Some(path.as_path()),
            PatchError::Pattern(_) | PatchError::InvalidConfig(_) => None,
        }
    }
}
