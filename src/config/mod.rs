//! Configuration for pipeline runs.
//!
//! - [`PipeConfig`] - Slot count and per-slot byte capacity
//!
//! # Example
//!
//! ```
//! use slotpipe::PipeConfig;
//!
//! // Custom slot geometry
//! let config = PipeConfig::new(4, 8192)?;
//!
//! // Builder pattern
//! let config = PipeConfig::default().with_slot_count(3);
//!
//! # Ok::<(), slotpipe::ConfigError>(())
//! ```

use crate::error::ConfigError;

/// Default number of slots in the ring (classic double buffering).
pub const DEFAULT_SLOT_COUNT: usize = 2;

/// Default capacity of each owned slot (64 KiB).
pub const DEFAULT_SLOT_CAPACITY: usize = 64 * 1024;

/// Configuration for a pipeline run.
///
/// `PipeConfig` fixes the slot geometry for one run:
///
/// - Slot count (`slot_count`) - How many buffers circulate in the ring
/// - Slot capacity (`slot_capacity`) - Bytes per buffer when the engine
///   allocates them
///
/// Both must be non-zero. The count is immutable once a run starts; more slots
/// let the producer run further ahead of the consumer, at the cost of memory.
/// Two slots already give full overlap when the two sides have similar pace.
///
/// When buffers are supplied externally via
/// [`Pipeline::run_with`](crate::Pipeline::run_with), `slot_capacity` is not
/// consulted: each supplied slice's own length is its slot's capacity.
///
/// # Example
///
/// ```
/// use slotpipe::PipeConfig;
///
/// // Use default configuration (2 slots of 64 KiB)
/// let config = PipeConfig::default();
///
/// // Custom configuration
/// let config = PipeConfig::new(3, 4096)?;
///
/// // Builder pattern
/// let config = PipeConfig::default()
///     .with_slot_count(4)
///     .with_slot_capacity(16 * 1024);
/// # Ok::<(), slotpipe::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipeConfig {
    /// Number of slots in the ring.
    slot_count: usize,

    /// Capacity of each owned slot in bytes.
    slot_capacity: usize,
}

impl PipeConfig {
    /// Creates a new configuration with the specified slot geometry.
    ///
    /// # Arguments
    ///
    /// * `slot_count` - Number of buffers in the ring (must be non-zero)
    /// * `slot_capacity` - Bytes per owned buffer (must be non-zero)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSlotCount`] or
    /// [`ConfigError::ZeroSlotCapacity`] if either value is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use slotpipe::PipeConfig;
    ///
    /// let config = PipeConfig::new(2, 4096)?;
    /// assert_eq!(config.slot_count(), 2);
    /// # Ok::<(), slotpipe::ConfigError>(())
    /// ```
    pub fn new(slot_count: usize, slot_capacity: usize) -> Result<Self, ConfigError> {
        if slot_count == 0 {
            return Err(ConfigError::ZeroSlotCount);
        }

        if slot_capacity == 0 {
            return Err(ConfigError::ZeroSlotCapacity);
        }

        Ok(Self {
            slot_count,
            slot_capacity,
        })
    }

    /// Sets the slot count.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PipeConfig::validate`] to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use slotpipe::PipeConfig;
    ///
    /// let config = PipeConfig::default().with_slot_count(3);
    /// assert_eq!(config.slot_count(), 3);
    /// ```
    pub fn with_slot_count(mut self, count: usize) -> Self {
        self.slot_count = count;
        self
    }

    /// Sets the per-slot capacity in bytes.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PipeConfig::validate`] to check if the configuration is valid.
    ///
    /// # Example
    ///
    /// ```
    /// use slotpipe::PipeConfig;
    ///
    /// let config = PipeConfig::default().with_slot_capacity(4096);
    /// assert_eq!(config.slot_capacity(), 4096);
    /// ```
    pub fn with_slot_capacity(mut self, capacity: usize) -> Self {
        self.slot_capacity = capacity;
        self
    }

    /// Returns the slot count.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Returns the per-slot capacity in bytes.
    pub fn slot_capacity(&self) -> usize {
        self.slot_capacity
    }

    /// Validates the current configuration.
    ///
    /// Returns an error if the configuration is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use slotpipe::PipeConfig;
    ///
    /// let config = PipeConfig::default().with_slot_count(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::new(self.slot_count, self.slot_capacity).map(|_| ())
    }
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            slot_capacity: DEFAULT_SLOT_CAPACITY,
        }
    }
}
