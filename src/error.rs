use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to run nvidia-smi: {0}")]
    GpuQuery(#[source] io::Error),

    #[error("unexpected nvidia-smi output: {line:?}")]
    GpuOutput { line: String },

    #[error("failed to read disk usage for {}: {source}", mount_point.display())]
    DiskUsage {
        mount_point: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
