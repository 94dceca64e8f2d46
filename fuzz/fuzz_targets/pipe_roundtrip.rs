#![no_main]

use libfuzzer_sys::fuzz_target;
use slotpipe::{PipeConfig, Pipeline};

fuzz_target!(|data: Vec<u8>| {
    if data.len() < 2 {
        return;
    }

    // Derive the slot geometry from the input, keep the rest as payload.
    let slot_capacity = (data[0] as usize % 64) + 1;
    let payload = &data[1..];

    for slot_count in [1, 2, 3, 4] {
        let config = PipeConfig::new(slot_count, slot_capacity).unwrap();

        // Feed the payload through in gulps whose sizes are themselves
        // derived from the payload, so short fills get exercised too.
        let mut offset = 0usize;
        let mut produced = 0u64;
        let mut received = Vec::with_capacity(payload.len());

        let stats = Pipeline::new(config)
            .run::<_, _, ()>(
                |buf| {
                    if offset == payload.len() {
                        return Ok(0);
                    }
                    let step = (payload[offset] as usize % buf.len()) + 1;
                    let take = step.min(payload.len() - offset);
                    buf[..take].copy_from_slice(&payload[offset..offset + take]);
                    offset += take;
                    produced += 1;
                    Ok(take)
                },
                |chunk| {
                    // Verify: chunks are non-empty and within slot capacity
                    assert!(!chunk.is_empty());
                    assert!(chunk.len() <= slot_capacity);
                    received.extend_from_slice(chunk);
                    Ok(())
                },
            )
            .unwrap();

        // Verify: every byte arrives exactly once, in order
        assert_eq!(received, payload);
        assert_eq!(stats.bytes, payload.len() as u64);
        assert_eq!(stats.chunks, produced);
    }

    // Same stream again through caller-owned buffers of uneven sizes.
    let mut small = vec![0u8; slot_capacity];
    let mut large = vec![0u8; slot_capacity * 2];
    let mut buffers: Vec<&mut [u8]> = vec![&mut small, &mut large];

    let mut offset = 0usize;
    let mut received = Vec::with_capacity(payload.len());

    let stats = Pipeline::new(PipeConfig::new(2, slot_capacity).unwrap())
        .run_with::<_, _, ()>(
            &mut buffers,
            |buf| {
                if offset == payload.len() {
                    return Ok(0);
                }
                let take = buf.len().min(payload.len() - offset);
                buf[..take].copy_from_slice(&payload[offset..offset + take]);
                offset += take;
                Ok(take)
            },
            |chunk| {
                // Verify: each slice's own length caps its chunk
                assert!(chunk.len() <= slot_capacity * 2);
                received.extend_from_slice(chunk);
                Ok(())
            },
        )
        .unwrap();

    assert_eq!(received, payload);
    assert_eq!(stats.bytes, payload.len() as u64);
});
