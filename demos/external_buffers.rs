//! Borrowed-buffer mode: the engine cycles caller-owned regions in strict
//! ring order and never allocates.
//!
//! Run with:
//!     cargo run --example external_buffers

use slotpipe::{PipeConfig, Pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    let mut c = [0u8; 32];
    println!(
        "supplied regions: {:p} {:p} {:p}\n",
        a.as_ptr(),
        b.as_ptr(),
        c.as_ptr()
    );

    let mut bufs = [&mut a[..], &mut b[..], &mut c[..]];

    let mut remaining = 7u8;
    let stats = Pipeline::new(PipeConfig::new(3, 32)?).run_with(
        &mut bufs,
        move |buf| {
            if remaining == 0 {
                return Ok::<_, std::io::Error>(0);
            }
            buf.fill(b'a' + remaining);
            remaining -= 1;
            Ok(buf.len())
        },
        |chunk| {
            println!(
                "consumed {:2} bytes at {:p} (first byte {:?})",
                chunk.len(),
                chunk.as_ptr(),
                chunk[0] as char
            );
            Ok(())
        },
    )?;

    println!(
        "\n{} chunks, {} bytes, no engine-owned buffers",
        stats.chunks, stats.bytes
    );
    Ok(())
}
