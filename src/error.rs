// Error types shared by the library modules. The binary layer wraps these
// in `anyhow` with extra context; the menu loop matches on them to print a
// short message and keep going.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading, mutating or saving the
/// course registry.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("course {0} already exists")]
    DuplicateCourse(String),
    #[error("course name must not be empty")]
    InvalidCourseName,
    #[error("invalid credit {0:?}: expected a positive whole number")]
    InvalidCredit(String),
    #[error("course {0} not found")]
    CourseNotFound(String),
    #[error("invalid score {0:?}: expected a number")]
    InvalidScore(String),
    #[error("score {0} is outside 0-100")]
    ScoreOutOfRange(f64),
    #[error("snapshot {} is corrupt: {reason}", .path.display())]
    CorruptSnapshot { path: PathBuf, reason: String },
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrackerError {
    /// Validation failures the user can fix by retrying with other input.
    /// Storage failures are not in this group.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            TrackerError::CorruptSnapshot { .. } | TrackerError::Io { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
