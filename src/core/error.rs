//! Error types
//!
//! Every failure is surfaced to the command layer; nothing here is retried.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a successful run
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status for a wrong command line (matches clap's own usage code)
pub const EXIT_USAGE: u8 = 2;

/// Exit status when the store cannot be allocated
pub const EXIT_RESOURCE: u8 = 3;

/// Exit status for open/read/store failures while processing the file
pub const EXIT_PROCESSING: u8 = 4;

/// Failure while recording an occurrence in the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to allocate storage while recording '{word}'")]
    Allocation {
        word: String,
        #[source]
        source: TryReserveError,
    },

    #[error("line numbers start at 1 (got 0 for '{0}')")]
    InvalidLineNumber(String),

    #[error("cannot record an empty word")]
    EmptyWord,
}

/// Failure while reading and tokenizing the input file
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed after line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("cannot record word on line {line}")]
    Store {
        line: usize,
        #[source]
        source: StoreError,
    },
}

impl IngestError {
    /// Classify a failed `File::open`
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            IngestError::NotFound { path, source }
        } else {
            IngestError::Open { path, source }
        }
    }
}

/// Top-level failure of a concordance run
#[derive(Debug, Error)]
pub enum ConcordError {
    #[error("could not allocate the concordance store")]
    Resource(#[source] TryReserveError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("failed to write the report")]
    Output(#[source] io::Error),
}

impl ConcordError {
    /// Process exit status for this failure
    pub fn exit_status(&self) -> u8 {
        match self {
            ConcordError::Resource(_) => EXIT_RESOURCE,
            ConcordError::Ingest(_) | ConcordError::Output(_) => EXIT_PROCESSING,
        }
    }
}

/// Map an error chain coming out of the command layer to an exit status.
///
/// Errors that carry no [`ConcordError`] are treated as processing failures.
pub fn exit_status_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ConcordError>()
        .map(ConcordError::exit_status)
        .unwrap_or(EXIT_PROCESSING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_open_classifies_not_found() {
        let err = IngestError::open(
            "missing.txt",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, IngestError::NotFound { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn test_open_classifies_other_errors() {
        let err = IngestError::open(
            "locked.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IngestError::Open { .. }));
    }

    #[test]
    fn test_exit_status_is_distinct_per_class() {
        let mut v: Vec<u8> = Vec::new();
        let reserve_err = v.try_reserve(usize::MAX).unwrap_err();

        let resource = ConcordError::Resource(reserve_err);
        let ingest = ConcordError::Ingest(IngestError::Read {
            line: 3,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        });
        let output = ConcordError::Output(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));

        assert_eq!(resource.exit_status(), EXIT_RESOURCE);
        assert_eq!(ingest.exit_status(), EXIT_PROCESSING);
        assert_eq!(output.exit_status(), EXIT_PROCESSING);
        assert_ne!(EXIT_USAGE, EXIT_RESOURCE);
        assert_ne!(EXIT_SUCCESS, EXIT_PROCESSING);
    }

    #[test]
    fn test_exit_code_survives_context() {
        let err: anyhow::Result<()> = Err(ConcordError::Ingest(IngestError::Store {
            line: 1,
            source: StoreError::EmptyWord,
        }))
        .context("processing input.txt");

        let err = err.unwrap_err();
        assert!(err.downcast_ref::<ConcordError>().is_some());
        assert_eq!(exit_status_for(&err), EXIT_PROCESSING);
    }

    #[test]
    fn test_foreign_errors_map_to_processing() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_status_for(&err), EXIT_PROCESSING);
    }

    #[test]
    fn test_store_error_chain_is_readable() {
        let err = IngestError::Store {
            line: 7,
            source: StoreError::InvalidLineNumber("cat".to_string()),
        };
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.contains("line 7"));
        assert!(chain.contains("'cat'"));
    }
}
