// Error types for the sweep
// Startup errors abort the run, entry errors are reported and collected

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Main error type for a sweep
///
/// Startup variants carry a suggestion line. Entry variants render as a
/// single console line and never stop a walk.
#[derive(Debug)]
pub enum SweepError {
    /// List file errors
    ListFileNotFound { path: PathBuf },
    ListFilePermissionDenied { path: PathBuf },
    ListFileRead { path: PathBuf, source: io::Error },

    /// Configuration errors
    InvalidConfig { message: String },

    /// A walk worker or job panicked
    WorkerFailed { reason: String },

    /// Per-entry errors raised while walking
    ScanDirectory { path: PathBuf, source: io::Error },
    Inspect { path: PathBuf, source: io::Error },
    Delete { path: PathBuf, source: io::Error },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SweepError::ListFileNotFound { path } => {
                writeln!(f, "List file not found: {}", path.display())?;
                write!(f, "Suggestion: Create the file or pass --list with the correct path")
            }
            SweepError::ListFilePermissionDenied { path } => {
                writeln!(f, "Permission denied while reading list file: {}", path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            SweepError::ListFileRead { path, source } => {
                writeln!(f, "I/O error while reading list file {}: {}", path.display(), source)?;
                write!(f, "Suggestion: Check that the list file is a readable text file")
            }
            SweepError::InvalidConfig { message } => {
                writeln!(f, "Invalid configuration: {}", message)?;
                write!(f, "Suggestion: Run with --help to see accepted options")
            }
            SweepError::WorkerFailed { reason } => {
                writeln!(f, "Sweep worker failed: {}", reason)?;
                write!(f, "Suggestion: Run the sweep again to process the remaining entries")
            }

            // Entry lines keep the fixed console prefixes
            SweepError::ScanDirectory { path, source } => {
                write!(f, "无法扫描目录: {}: {}", path.display(), source)
            }
            SweepError::Inspect { path, source } => {
                write!(f, "无法获取文件信息: {}: {}", path.display(), source)
            }
            SweepError::Delete { path, source } => {
                write!(f, "无法删除文件: {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::ListFileRead { source, .. }
            | SweepError::ScanDirectory { source, .. }
            | SweepError::Inspect { source, .. }
            | SweepError::Delete { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl SweepError {
    /// Map an io::Error raised while reading the list file to the most
    /// specific variant
    pub fn from_list_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SweepError::ListFileNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => SweepError::ListFilePermissionDenied {
                path: path.to_path_buf(),
            },
            _ => SweepError::ListFileRead {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}
