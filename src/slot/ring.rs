//! Fixed ring of reusable byte buffers.

/// One fixed-capacity buffer plus its current valid length.
///
/// A slot is the unit of handoff between producer and consumer. It holds an
/// exclusive view of one ring buffer, so whichever side currently holds the
/// slot value is the only code that can touch those bytes. Moving the slot
/// through a channel transfers that right wholesale.
#[derive(Debug)]
pub(crate) struct Slot<'a> {
    index: usize,
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Slot<'a> {
    pub(crate) fn new(index: usize, buf: &'a mut [u8]) -> Self {
        Self { index, buf, len: 0 }
    }

    /// Position of this slot in the ring, `0..slot_count`.
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// Total writable capacity of the underlying buffer.
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of valid bytes recorded by the last `fill`.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// The full-capacity mutable view handed to the produce callback.
    pub(crate) fn writable(&mut self) -> &mut [u8] {
        self.buf
    }

    /// Records the number of valid bytes written by the producer.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the slot capacity; a produce callback claiming
    /// to have written more bytes than it was given room for is a contract
    /// violation, like `Read::read` returning more than `buf.len()`.
    pub(crate) fn fill(&mut self, len: usize) {
        assert!(
            len <= self.capacity(),
            "produce reported {} bytes for a {}-byte slot",
            len,
            self.capacity()
        );
        self.len = len;
    }

    /// The filled prefix handed to the consume callback.
    pub(crate) fn payload(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// The N regions backing one pipeline run, tagged by ownership mode.
///
/// `Owned` regions are allocated here and freed exactly once when the ring
/// drops, after the worker has been joined. `Borrowed` regions belong to the
/// caller and are only ever reborrowed. The mode is fixed at construction and
/// never mixed within a run.
#[derive(Debug)]
pub(crate) enum SlotRing<'a> {
    Owned(Vec<Box<[u8]>>),
    Borrowed(Vec<&'a mut [u8]>),
}

impl<'a> SlotRing<'a> {
    /// Allocates `count` zeroed regions of `capacity` bytes each.
    pub(crate) fn owned(count: usize, capacity: usize) -> Self {
        SlotRing::Owned(
            (0..count)
                .map(|_| vec![0u8; capacity].into_boxed_slice())
                .collect(),
        )
    }

    /// Adopts caller-supplied regions without taking ownership.
    pub(crate) fn borrowed(bufs: Vec<&'a mut [u8]>) -> Self {
        SlotRing::Borrowed(bufs)
    }

    /// Hands out one `Slot` view per region, in ring index order.
    ///
    /// The views borrow the ring, so the regions themselves cannot move or be
    /// freed while any slot is alive; callbacks only ever see the original N
    /// addresses.
    pub(crate) fn slots(&mut self) -> Vec<Slot<'_>> {
        match self {
            SlotRing::Owned(bufs) => bufs
                .iter_mut()
                .enumerate()
                .map(|(index, buf)| Slot::new(index, buf))
                .collect(),
            SlotRing::Borrowed(bufs) => bufs
                .iter_mut()
                .enumerate()
                .map(|(index, buf)| Slot::new(index, buf))
                .collect(),
        }
    }
}
