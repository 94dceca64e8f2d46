//! Error types for slotpipe.

use std::fmt;

/// Errors in the pipeline's slot geometry, reported before any thread starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The slot count was zero; the ring needs at least one slot.
    ZeroSlotCount,

    /// The slot capacity was zero; a zero-byte slot can never carry data.
    ZeroSlotCapacity,

    /// The number of external buffers did not match the configured slot count.
    BufferCountMismatch {
        /// The configured slot count.
        expected: usize,
        /// The number of buffers actually supplied.
        actual: usize,
    },

    /// An external buffer was zero-length.
    EmptyBuffer {
        /// Position of the offending buffer in the supplied list.
        index: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSlotCount => write!(f, "slot count must be non-zero"),
            ConfigError::ZeroSlotCapacity => write!(f, "slot capacity must be non-zero"),
            ConfigError::BufferCountMismatch { expected, actual } => {
                write!(
                    f,
                    "external buffer count mismatch: expected {}, got {}",
                    expected, actual
                )
            }
            ConfigError::EmptyBuffer { index } => {
                write!(f, "external buffer {} is empty", index)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can end a pipeline run.
///
/// `E` is the fault type returned by the produce and consume callbacks. A
/// fault raised on the worker thread arrives here as [`PipeError::Producer`];
/// one raised on the calling thread as [`PipeError::Consumer`]. When both
/// occur in the same run, the consumer's fault is the one surfaced.
#[derive(Debug)]
pub enum PipeError<E> {
    /// The slot geometry was rejected before any thread started.
    Config(ConfigError),

    /// The operating system refused to spawn the worker thread.
    Spawn(std::io::Error),

    /// The produce callback returned a fault.
    Producer(E),

    /// The consume callback returned a fault.
    Consumer(E),
}

impl<E> PipeError<E> {
    /// Returns the callback fault carried by this error, if any.
    ///
    /// `Config` and `Spawn` errors carry no callback fault and yield `None`.
    pub fn fault(self) -> Option<E> {
        match self {
            PipeError::Producer(e) | PipeError::Consumer(e) => Some(e),
            _ => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for PipeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipeError::Config(e) => write!(f, "invalid config: {}", e),
            PipeError::Spawn(e) => write!(f, "failed to spawn worker thread: {}", e),
            PipeError::Producer(e) => write!(f, "producer fault: {}", e),
            PipeError::Consumer(e) => write!(f, "consumer fault: {}", e),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for PipeError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipeError::Config(e) => Some(e),
            PipeError::Spawn(e) => Some(e),
            PipeError::Producer(e) | PipeError::Consumer(e) => Some(e),
        }
    }
}

impl<E> From<ConfigError> for PipeError<E> {
    fn from(e: ConfigError) -> Self {
        PipeError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: PipeError<std::io::Error> = ConfigError::ZeroSlotCount.into();
        assert!(matches!(err, PipeError::Config(ConfigError::ZeroSlotCount)));
    }

    #[test]
    fn test_display() {
        let err = ConfigError::BufferCountMismatch {
            expected: 3,
            actual: 2,
        };
        assert!(err.to_string().contains("expected 3, got 2"));

        let err: PipeError<&str> = PipeError::Producer("disk on fire");
        assert!(err.to_string().contains("producer fault"));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_fault_accessor() {
        let err: PipeError<&str> = PipeError::Consumer("sink full");
        assert_eq!(err.fault(), Some("sink full"));

        let err: PipeError<&str> = ConfigError::ZeroSlotCapacity.into();
        assert_eq!(err.fault(), None);
    }

    #[test]
    fn test_source_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipeError<std::io::Error> = PipeError::Producer(io_err);
        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(source.is_some_and(|s| s.to_string().contains("gone")));
    }
}
