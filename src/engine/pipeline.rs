//! Pipeline entry points and run finalization.

use std::thread;

use tracing::{debug, trace};

use crate::config::PipeConfig;
use crate::error::{ConfigError, PipeError};
use crate::flow;
use crate::slot::{Slot, SlotRing};

use super::driver::{self, DriveOutcome};
use super::worker;

/// Summary counters for one completed run.
///
/// Returned by [`Pipeline::run`] and [`Pipeline::run_with`] on success.
/// `bytes` equals the sum of the lengths returned by produce before the
/// terminating zero-length call, which is exactly what consume observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipeStats {
    /// Number of chunks published by produce and handed to consume.
    pub chunks: u64,

    /// Total payload bytes across those chunks.
    pub bytes: u64,
}

/// Bounded fixed-slot pipelining engine.
///
/// A `Pipeline` drives one byte stream from a `produce` callback to a
/// `consume` callback through a ring of `slot_count` reusable buffers.
/// `produce` runs on a background worker thread; `consume` runs on the
/// calling thread. While one chunk is being consumed the worker is already
/// filling the next slot, so the two latencies overlap instead of adding up.
///
/// The callbacks:
///
/// - `produce(&mut [u8]) -> Result<usize, E>` writes into a slot's full
///   capacity and returns how many bytes are valid; `Ok(0)` ends the stream.
/// - `consume(&[u8]) -> Result<(), E>` receives exactly the filled prefix of
///   each slot, in production order.
///
/// Returning `Err` from either callback stops the run and surfaces that
/// fault as [`PipeError::Producer`] or [`PipeError::Consumer`]. On every
/// path, the worker thread is joined before the call returns.
///
/// The value only holds the configuration; one `Pipeline` may drive any
/// number of sequential runs.
///
/// # Example
///
/// ```
/// use std::io::Read;
///
/// use slotpipe::{PipeConfig, Pipeline};
///
/// let mut source = &b"0123456789"[..];
/// let mut sink = Vec::new();
///
/// let pipeline = Pipeline::new(PipeConfig::new(2, 4)?);
/// let stats = pipeline.run(
///     |buf| source.read(buf),
///     |chunk| {
///         sink.extend_from_slice(chunk);
///         Ok(())
///     },
/// )?;
///
/// assert_eq!(sink, b"0123456789");
/// assert_eq!(stats.chunks, 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    config: PipeConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given slot geometry.
    ///
    /// The configuration is validated when a run starts, so an invalid one is
    /// reported by [`Pipeline::run`] rather than here.
    pub fn new(config: PipeConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this pipeline runs with.
    pub fn config(&self) -> &PipeConfig {
        &self.config
    }

    /// Pipes one stream from `produce` to `consume` using engine-owned
    /// buffers.
    ///
    /// Allocates `slot_count` buffers of `slot_capacity` bytes, runs the
    /// stream to completion, joins the worker, and frees the buffers. Blocks
    /// the calling thread until the run ends.
    ///
    /// # Errors
    ///
    /// - [`PipeError::Config`] if the configuration fails validation
    /// - [`PipeError::Spawn`] if the worker thread cannot be created
    /// - [`PipeError::Producer`] / [`PipeError::Consumer`] for a callback
    ///   fault; when both sides fault in one run, the consumer's fault is
    ///   the one surfaced
    ///
    /// # Panics
    ///
    /// A panic inside either callback unwinds this call (a produce panic is
    /// forwarded after the worker is joined). `produce` returning a length
    /// greater than the slot capacity panics.
    pub fn run<P, C, E>(&self, produce: P, consume: C) -> Result<PipeStats, PipeError<E>>
    where
        P: FnMut(&mut [u8]) -> Result<usize, E> + Send,
        C: FnMut(&[u8]) -> Result<(), E>,
        E: Send,
    {
        self.config.validate()?;

        debug!(
            slot_count = self.config.slot_count(),
            slot_capacity = self.config.slot_capacity(),
            "starting run with owned buffers"
        );
        let mut ring = SlotRing::owned(self.config.slot_count(), self.config.slot_capacity());
        drive(ring.slots(), produce, consume)
    }

    /// Pipes one stream from `produce` to `consume` using caller-supplied
    /// buffers.
    ///
    /// Exactly `slot_count` non-empty slices must be supplied; the engine
    /// never allocates, and each slice's own length is its slot's capacity
    /// (`slot_capacity` is not consulted). The callbacks only ever see these
    /// addresses, cycling in ring order.
    ///
    /// # Errors
    ///
    /// In addition to everything [`Pipeline::run`] reports:
    ///
    /// - [`ConfigError::BufferCountMismatch`] if the slice count differs from
    ///   `slot_count`
    /// - [`ConfigError::EmptyBuffer`] if any slice is zero-length
    ///
    /// Both are reported before any thread starts or any callback runs.
    ///
    /// # Example
    ///
    /// ```
    /// use std::io::Read;
    ///
    /// use slotpipe::{PipeConfig, Pipeline};
    ///
    /// let mut a = [0u8; 4];
    /// let mut b = [0u8; 4];
    /// let mut bufs = [&mut a[..], &mut b[..]];
    ///
    /// let mut source = &b"abcdefgh"[..];
    /// let mut sink = Vec::new();
    ///
    /// let pipeline = Pipeline::new(PipeConfig::new(2, 4)?);
    /// pipeline.run_with(
    ///     &mut bufs,
    ///     |buf| source.read(buf),
    ///     |chunk| {
    ///         sink.extend_from_slice(chunk);
    ///         Ok(())
    ///     },
    /// )?;
    ///
    /// assert_eq!(sink, b"abcdefgh");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn run_with<P, C, E>(
        &self,
        buffers: &mut [&mut [u8]],
        produce: P,
        consume: C,
    ) -> Result<PipeStats, PipeError<E>>
    where
        P: FnMut(&mut [u8]) -> Result<usize, E> + Send,
        C: FnMut(&[u8]) -> Result<(), E>,
        E: Send,
    {
        self.config.validate()?;

        let expected = self.config.slot_count();
        if buffers.len() != expected {
            return Err(ConfigError::BufferCountMismatch {
                expected,
                actual: buffers.len(),
            }
            .into());
        }
        for (index, buf) in buffers.iter().enumerate() {
            if buf.is_empty() {
                return Err(ConfigError::EmptyBuffer { index }.into());
            }
        }

        debug!(slot_count = expected, "starting run with borrowed buffers");
        let mut ring = SlotRing::borrowed(buffers.iter_mut().map(|buf| &mut **buf).collect());
        drive(ring.slots(), produce, consume)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipeConfig::default())
    }
}

/// Spawns the worker, drains the stream, and finalizes the run.
///
/// Finalization order on every path: the driver's channel ends drop when the
/// drain loop returns (the stop request and wake-up in one step), then the
/// worker is joined, then the outcome is surfaced. The ring outlives this
/// call, so owned buffers are freed only after the join.
fn drive<P, C, E>(slots: Vec<Slot<'_>>, produce: P, consume: C) -> Result<PipeStats, PipeError<E>>
where
    P: FnMut(&mut [u8]) -> Result<usize, E> + Send,
    C: FnMut(&[u8]) -> Result<(), E>,
    E: Send,
{
    let (pflow, cflow) = flow::channels(slots);

    thread::scope(|scope| {
        let worker = thread::Builder::new()
            .name("slotpipe-fill".to_string())
            .spawn_scoped(scope, move || worker::fill_loop(pflow, produce))
            .map_err(PipeError::Spawn)?;

        let outcome = driver::drain_loop(cflow, consume);

        // drain_loop consumed the driver's channel ends, so a worker blocked
        // on the ring has already been woken by the disconnect.
        trace!("joining producer worker");
        if let Err(panic) = worker.join() {
            std::panic::resume_unwind(panic);
        }
        trace!("producer worker joined");

        match outcome {
            DriveOutcome::Drained(stats) => Ok(stats),
            DriveOutcome::ProducerFault(fault) => Err(PipeError::Producer(fault)),
            DriveOutcome::ConsumerFault(fault) => Err(PipeError::Consumer(fault)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_round_trip() {
        let mut source = &b"hello slot world"[..];
        let mut sink = Vec::new();

        let stats = Pipeline::new(PipeConfig::new(2, 4).unwrap())
            .run(
                |buf| std::io::Read::read(&mut source, buf),
                |chunk| {
                    sink.extend_from_slice(chunk);
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(sink, b"hello slot world");
        assert_eq!(stats.bytes, 16);
        assert_eq!(stats.chunks, 4);
    }

    #[test]
    fn test_run_validates_config() {
        let pipeline = Pipeline::new(PipeConfig::default().with_slot_count(0));
        let result = pipeline.run::<_, _, &str>(|_buf| Ok(0), |_chunk| Ok(()));

        assert!(matches!(
            result,
            Err(PipeError::Config(ConfigError::ZeroSlotCount))
        ));
    }

    #[test]
    fn test_run_with_rejects_count_mismatch() {
        let mut a = [0u8; 4];
        let mut bufs = [&mut a[..]];

        let result = Pipeline::new(PipeConfig::new(2, 4).unwrap()).run_with::<_, _, &str>(
            &mut bufs,
            |_buf| Ok(0),
            |_chunk| Ok(()),
        );

        assert!(matches!(
            result,
            Err(PipeError::Config(ConfigError::BufferCountMismatch {
                expected: 2,
                actual: 1,
            }))
        ));
    }

    #[test]
    fn test_run_with_rejects_empty_buffer() {
        let mut a = [0u8; 4];
        let mut b = [0u8; 0];
        let mut bufs = [&mut a[..], &mut b[..]];

        let result = Pipeline::default().run_with::<_, _, &str>(
            &mut bufs,
            |_buf| Ok(0),
            |_chunk| Ok(()),
        );

        assert!(matches!(
            result,
            Err(PipeError::Config(ConfigError::EmptyBuffer { index: 1 }))
        ));
    }

    #[test]
    fn test_pipeline_is_reusable() {
        let pipeline = Pipeline::default();

        for round in 0..3u8 {
            let mut left = 5;
            let mut sink = Vec::new();
            let stats = pipeline
                .run::<_, _, &str>(
                    |buf| {
                        if left == 0 {
                            return Ok(0);
                        }
                        left -= 1;
                        buf[0] = round;
                        Ok(1)
                    },
                    |chunk| {
                        sink.extend_from_slice(chunk);
                        Ok(())
                    },
                )
                .unwrap();

            assert_eq!(stats.chunks, 5);
            assert_eq!(sink, vec![round; 5]);
        }
    }
}
