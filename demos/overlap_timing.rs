//! Side-by-side timing of a latency-bound produce/consume pair, first run
//! serially, then overlapped through the pipeline.
//!
//! Run with:
//!     cargo run --example overlap_timing

use std::io::Read;
use std::thread;
use std::time::{Duration, Instant};

use slotpipe::{PipeConfig, Pipeline};

const CHUNK: usize = 100;
const TOTAL: usize = 1000;
const LATENCY: Duration = Duration::from_millis(5);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..TOTAL).map(|i| (i % 256) as u8).collect();

    // Serial baseline: each chunk pays both latencies back to back.
    let start = Instant::now();
    {
        let mut source = &data[..];
        let mut buf = [0u8; CHUNK];
        let mut out = Vec::new();
        loop {
            thread::sleep(LATENCY); // produce latency
            let n = source.read(&mut buf)?;
            if n == 0 {
                break;
            }
            thread::sleep(LATENCY); // consume latency
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, data);
    }
    let serial = start.elapsed();

    // Pipelined: while one chunk is being consumed, the worker is already
    // producing the next.
    let start = Instant::now();
    {
        let mut source = &data[..];
        let mut out = Vec::new();
        Pipeline::new(PipeConfig::new(2, CHUNK)?).run(
            move |buf| {
                thread::sleep(LATENCY);
                source.read(buf)
            },
            |chunk| {
                thread::sleep(LATENCY);
                out.extend_from_slice(chunk);
                Ok(())
            },
        )?;
        assert_eq!(out, data);
    }
    let pipelined = start.elapsed();

    println!(
        "{} chunks, {:?} latency on each side",
        TOTAL / CHUNK,
        LATENCY
    );
    println!("Serial:    {:?}", serial);
    println!("Pipelined: {:?}", pipelined);
    println!(
        "Speedup:   {:.2}x",
        serial.as_secs_f64() / pipelined.as_secs_f64()
    );
    Ok(())
}
