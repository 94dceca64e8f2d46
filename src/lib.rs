//! slotpipe
//!
//! Bounded fixed-slot pipelining for Rust.
//!
//! `slotpipe` overlaps production and consumption of a byte stream across two
//! threads: a `produce` callback fills reusable fixed-capacity buffers on a
//! background worker while a `consume` callback drains them on the calling
//! thread. N buffers circulate in strict ring order, so when producing a
//! chunk (e.g. I/O) and consuming it (e.g. processing) have independent
//! latency, the two wait side by side instead of back to back. It is a small,
//! composable primitive for:
//!
//! - reading ahead of a parser or decoder
//! - device-to-device copying
//! - feeding a compressor or hasher while the next block loads
//! - any two-stage chunk loop where both stages stall
//!
//! The crate intentionally:
//! - does NOT spawn more than one worker thread
//! - does NOT buffer beyond the fixed slot count
//! - does NOT fan out to multiple producers or consumers
//! - does NOT impose timeouts or deadlines
//!
//! It only does one thing: **produce a chunk → hand it off → consume it**
//!
//! # Callbacks
//!
//! ```text
//! produce: FnMut(&mut [u8]) -> Result<usize, E> + Send    worker thread
//! consume: FnMut(&[u8])     -> Result<(), E>              calling thread
//! ```
//!
//! `produce` writes into a slot's full capacity and returns how many bytes
//! are valid; `Ok(0)` ends the stream. `consume` sees exactly those bytes,
//! chunk by chunk, in order. Either side may return a fault `E`, which stops
//! the run, joins the worker, and surfaces as [`PipeError`].
//!
//! # Piping a reader to a writer
//!
//! ```no_run
//! use std::fs::File;
//!
//! use slotpipe::PipeConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut input = File::open("data.bin")?;
//!     let mut output = File::create("copy.bin")?;
//!
//!     let bytes = slotpipe::io::copy(&mut input, &mut output, PipeConfig::default())?;
//!     println!("piped {} bytes", bytes);
//!     Ok(())
//! }
//! ```
//!
//! # Custom callbacks
//!
//! ```
//! use std::io::Read;
//!
//! use slotpipe::{PipeConfig, Pipeline};
//!
//! let mut source = &b"0123456789"[..];
//! let mut sink = Vec::new();
//!
//! let pipeline = Pipeline::new(PipeConfig::new(2, 4)?);
//! let stats = pipeline.run(
//!     |buf| source.read(buf),
//!     |chunk| {
//!         sink.extend_from_slice(chunk);
//!         Ok(())
//!     },
//! )?;
//!
//! assert_eq!(sink, b"0123456789");
//! assert_eq!(stats.chunks, 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;

mod flow; // internal (bounded slot handoff)
mod slot; // internal (ring storage)

pub mod io;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_SLOT_CAPACITY, DEFAULT_SLOT_COUNT, PipeConfig};
pub use engine::{PipeStats, Pipeline};
pub use error::{ConfigError, PipeError};
