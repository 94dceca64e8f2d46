//! Bounded slot handoff between producer and consumer.
//!
//! The flow controller is the only synchronization in the engine: two bounded
//! channels of ring depth, one carrying empty slots back to the producer and
//! one carrying filled slots (or the single terminal fault) to the consumer.
//! Channel occupancy is the filled/empty accounting of the ring, and moving a
//! slot value through a channel is the handoff that makes its bytes visible
//! to the other side. No lock or atomic touches slot data.
//!
//! Shutdown is expressed by hanging up: the producer ends the stream by
//! dropping its end of the filled channel, the consumer requests an early
//! stop by dropping both of its ends.

use std::sync::mpsc::{self, Receiver, SyncSender};

use crate::slot::Slot;

/// Returned when the peer side of the ring has hung up.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Disconnected;

/// The producer's two channel ends: receives empties, sends fills.
pub(crate) struct ProducerFlow<'a, E> {
    empty: Receiver<Slot<'a>>,
    filled: SyncSender<Result<Slot<'a>, E>>,
}

/// The consumer's two channel ends: receives fills, sends empties back.
pub(crate) struct ConsumerFlow<'a, E> {
    filled: Receiver<Result<Slot<'a>, E>>,
    empty: SyncSender<Slot<'a>>,
}

/// Builds the two bounded channels for one run and pre-loads every slot into
/// the empty channel in index order.
///
/// The pre-load is the `empty = N, filled = 0` starting state. Each side ever
/// holds at most one slot while the rest queue in one of the two channels, so
/// neither send can block; the channel bound alone throttles the ring.
pub(crate) fn channels<'a, E>(slots: Vec<Slot<'a>>) -> (ProducerFlow<'a, E>, ConsumerFlow<'a, E>) {
    debug_assert!(!slots.is_empty(), "ring must contain at least one slot");

    let depth = slots.len();
    let (empty_tx, empty_rx) = mpsc::sync_channel(depth);
    let (filled_tx, filled_rx) = mpsc::sync_channel(depth);

    for slot in slots {
        empty_tx
            .send(slot)
            .expect("empty channel holds the whole ring");
    }

    (
        ProducerFlow {
            empty: empty_rx,
            filled: filled_tx,
        },
        ConsumerFlow {
            filled: filled_rx,
            empty: empty_tx,
        },
    )
}

impl<'a, E> ProducerFlow<'a, E> {
    /// Blocks for the next empty slot. `None` means the consumer hung up and
    /// every queued slot has been drained: the stop request.
    pub(crate) fn next_empty(&self) -> Option<Slot<'a>> {
        self.empty.recv().ok()
    }

    /// Publishes a filled slot to the consumer.
    pub(crate) fn publish(&self, slot: Slot<'a>) -> Result<(), Disconnected> {
        self.filled.send(Ok(slot)).map_err(|_| Disconnected)
    }

    /// Sends the terminal fault to the consumer in place of a slot.
    pub(crate) fn fault(&self, fault: E) -> Result<(), Disconnected> {
        self.filled.send(Err(fault)).map_err(|_| Disconnected)
    }
}

impl<'a, E> ConsumerFlow<'a, E> {
    /// Blocks for the next filled slot or the terminal fault. `None` means
    /// the producer hung up after its last publish: end of stream.
    pub(crate) fn next_filled(&self) -> Option<Result<Slot<'a>, E>> {
        self.filled.recv().ok()
    }

    /// Returns a drained slot to the producer for reuse.
    pub(crate) fn recycle(&self, slot: Slot<'a>) -> Result<(), Disconnected> {
        self.empty.send(slot).map_err(|_| Disconnected)
    }
}
