//! Pipelined file copy: reads overlap writes.
//!
//! Run with:
//!     cargo run --example file_copy -- /path/to/source /path/to/dest

use std::env;
use std::fs::File;
use std::time::Instant;

use slotpipe::PipeConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());
    let dest = env::args()
        .nth(2)
        .unwrap_or_else(|| "/tmp/slotpipe-copy.out".to_string());

    let mut input = File::open(&source)?;
    let mut output = File::create(&dest)?;

    // A third slot smooths over bursty reads.
    let config = PipeConfig::default().with_slot_count(3);

    let start = Instant::now();
    let bytes = slotpipe::io::copy(&mut input, &mut output, config)?;
    let elapsed = start.elapsed();

    println!("Copied {} -> {}", source, dest);
    println!("{} bytes in {:?}", bytes, elapsed);
    Ok(())
}
