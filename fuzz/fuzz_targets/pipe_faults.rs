#![no_main]

use libfuzzer_sys::fuzz_target;
use slotpipe::{PipeConfig, PipeError, Pipeline};

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 4 {
        return;
    }

    let slot_count = (data[0] as usize % 4) + 1;
    let fault_at = (data[1] as usize % 16) + 1;
    let producer_side = data[2] % 2 == 0;
    let tag = data[3];

    let pipeline = Pipeline::new(PipeConfig::new(slot_count, 8).unwrap());

    let mut produce_calls = 0usize;
    let mut consume_calls = 0usize;

    // An endless producer, so the run can only end through the fault.
    let result = pipeline.run(
        |buf| {
            produce_calls += 1;
            if producer_side && produce_calls == fault_at {
                return Err(tag);
            }
            buf.fill(0xab);
            Ok(buf.len())
        },
        |chunk| {
            consume_calls += 1;
            if !producer_side && consume_calls == fault_at {
                return Err(tag);
            }
            assert_eq!(chunk.len(), 8);
            Ok(())
        },
    );

    if producer_side {
        match result {
            Err(PipeError::Producer(t)) => assert_eq!(t, tag),
            other => panic!("expected a producer fault, got {:?}", other),
        }
        // Verify: every chunk queued ahead of the fault is still consumed
        assert_eq!(consume_calls, fault_at - 1);
    } else {
        match result {
            Err(PipeError::Consumer(t)) => assert_eq!(t, tag),
            other => panic!("expected a consumer fault, got {:?}", other),
        }
        // Verify: the worker never runs further ahead than the ring allows
        assert!(produce_calls >= fault_at);
        assert!(produce_calls <= fault_at + slot_count - 1);
    }
});
