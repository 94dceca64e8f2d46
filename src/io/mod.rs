//! `std::io` adapters for the pipeline.
//!
//! - [`from_reader`] - produce callback that fills slots from any [`Read`]
//! - [`into_writer`] - consume callback that drains chunks into any [`Write`]
//! - [`copy`] - pipelined byte copy shaped like [`std::io::copy`]

use std::io::{ErrorKind, Read, Write};

use crate::config::PipeConfig;
use crate::engine::Pipeline;
use crate::error::PipeError;

/// Wraps a reader as a produce callback.
///
/// Each call reads into the slot's full capacity; a read of 0 bytes is end
/// of stream, per the [`Read`] contract. [`ErrorKind::Interrupted`] reads
/// are retried rather than surfaced as faults.
///
/// # Example
///
/// ```
/// use slotpipe::{io, PipeConfig, Pipeline};
///
/// let reader = &b"feed me"[..];
/// let mut sink = Vec::new();
///
/// Pipeline::new(PipeConfig::new(2, 3)?).run(
///     io::from_reader(reader),
///     io::into_writer(&mut sink),
/// )?;
///
/// assert_eq!(sink, b"feed me");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn from_reader<R: Read>(mut reader: R) -> impl FnMut(&mut [u8]) -> std::io::Result<usize> {
    move |buf| loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => break result,
        }
    }
}

/// Wraps a writer as a consume callback.
///
/// Each chunk is written in full with [`Write::write_all`]. Nothing is
/// flushed; flush after the run if the writer buffers.
pub fn into_writer<W: Write>(mut writer: W) -> impl FnMut(&[u8]) -> std::io::Result<()> {
    move |chunk| writer.write_all(chunk)
}

/// Pipes `reader` to `writer` with reads and writes overlapped.
///
/// Shaped like [`std::io::copy`]: returns the number of bytes piped and does
/// not flush the writer. The read side runs on the pipeline's worker thread,
/// so a slow reader and a slow writer wait side by side instead of back to
/// back.
///
/// # Errors
///
/// Read faults surface as [`PipeError::Producer`], write faults as
/// [`PipeError::Consumer`], plus the usual configuration errors.
///
/// # Example
///
/// ```
/// use slotpipe::PipeConfig;
///
/// let mut input = &b"stream of bytes to relay"[..];
/// let mut output = Vec::new();
///
/// let piped = slotpipe::io::copy(&mut input, &mut output, PipeConfig::default())?;
///
/// assert_eq!(piped, 24);
/// assert_eq!(output, b"stream of bytes to relay");
/// # Ok::<(), slotpipe::PipeError<std::io::Error>>(())
/// ```
pub fn copy<R, W>(
    reader: &mut R,
    writer: &mut W,
    config: PipeConfig,
) -> Result<u64, PipeError<std::io::Error>>
where
    R: Read + Send + ?Sized,
    W: Write + ?Sized,
{
    let stats = Pipeline::new(config).run(from_reader(reader), into_writer(writer))?;
    Ok(stats.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flaky {
        state: u8,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.state {
                0 => {
                    self.state = 1;
                    Err(std::io::Error::new(ErrorKind::Interrupted, "try again"))
                }
                1 => {
                    self.state = 2;
                    buf[..2].copy_from_slice(b"ok");
                    Ok(2)
                }
                _ => Ok(0),
            }
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("cable unplugged"))
        }
    }

    struct FullSink;

    impl Write for FullSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_copy_round_trip() {
        let data: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let mut reader = &data[..];
        let mut writer = Vec::new();

        let piped = copy(&mut reader, &mut writer, PipeConfig::new(3, 64).unwrap()).unwrap();

        assert_eq!(piped, 1000);
        assert_eq!(writer, data);
    }

    #[test]
    fn test_from_reader_retries_interrupted() {
        let mut produce = from_reader(Flaky { state: 0 });
        let mut buf = [0u8; 8];

        assert_eq!(produce(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ok");
        assert_eq!(produce(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_copy_surfaces_reader_fault() {
        let mut writer = Vec::new();
        let err = copy(&mut Broken, &mut writer, PipeConfig::default()).unwrap_err();

        match err {
            PipeError::Producer(e) => assert_eq!(e.to_string(), "cable unplugged"),
            other => panic!("expected producer fault, got {}", other),
        }
        assert!(writer.is_empty(), "no chunk reaches the writer");
    }

    #[test]
    fn test_copy_surfaces_writer_fault() {
        let mut reader = &[7u8; 100][..];
        let err = copy(&mut reader, &mut FullSink, PipeConfig::new(2, 16).unwrap()).unwrap_err();

        assert!(matches!(err, PipeError::Consumer(_)));
    }
}
