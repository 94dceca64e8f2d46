//! Consumer driver loop, run on the calling thread.

use tracing::{debug, trace};

use crate::flow::ConsumerFlow;

use super::pipeline::PipeStats;

/// How one drain pass ended.
#[derive(Debug)]
pub(crate) enum DriveOutcome<E> {
    /// The producer signalled end of stream and every chunk was consumed.
    Drained(PipeStats),
    /// The producer's transported fault arrived in band.
    ProducerFault(E),
    /// The consume callback itself faulted.
    ConsumerFault(E),
}

/// Runs the consume side until end of stream or a fault on either side.
///
/// Consumes the driver's channel ends; dropping them on return is the stop
/// request that wakes and halts the worker. A consumer fault returns without
/// recycling the slot in hand, and before any queued producer fault would be
/// read, which is what gives the consumer's fault surfacing priority.
pub(crate) fn drain_loop<C, E>(flow: ConsumerFlow<'_, E>, mut consume: C) -> DriveOutcome<E>
where
    C: FnMut(&[u8]) -> Result<(), E>,
{
    let mut stats = PipeStats::default();

    while let Some(message) = flow.next_filled() {
        let slot = match message {
            Ok(slot) => slot,
            Err(fault) => {
                debug!("producer fault received, stopping");
                return DriveOutcome::ProducerFault(fault);
            }
        };

        trace!(slot = slot.index(), len = slot.len(), "consuming chunk");
        if let Err(fault) = consume(slot.payload()) {
            debug!(slot = slot.index(), "consume failed, shutting down");
            return DriveOutcome::ConsumerFault(fault);
        }

        stats.chunks += 1;
        stats.bytes += slot.len() as u64;

        // A failed recycle just means the worker already exited.
        let _ = flow.recycle(slot);
    }

    trace!(chunks = stats.chunks, bytes = stats.bytes, "stream drained");
    DriveOutcome::Drained(stats)
}
