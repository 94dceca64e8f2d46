//! Internal slot storage for the pipeline ring.
//!
//! This module provides the fixed set of reusable buffers that circulate
//! between producer and consumer, in either ownership mode. It is an
//! implementation detail and not part of the public API.

mod ring;

pub(crate) use ring::{Slot, SlotRing};
