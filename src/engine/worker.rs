//! Producer worker loop, run on the background thread.

use tracing::{debug, trace};

use crate::flow::ProducerFlow;

/// Runs the produce side until end of stream, a fault, or a stop request.
///
/// Owns the producer's channel ends; dropping them on return is the done
/// signal the driver observes after draining whatever was published. At most
/// one produce call is ever in flight, and none overlap.
pub(crate) fn fill_loop<P, E>(flow: ProducerFlow<'_, E>, mut produce: P)
where
    P: FnMut(&mut [u8]) -> Result<usize, E>,
{
    while let Some(mut slot) = flow.next_empty() {
        let len = match produce(slot.writable()) {
            Ok(len) => len,
            Err(fault) => {
                debug!(slot = slot.index(), "produce failed, forwarding fault");
                let _ = flow.fault(fault);
                return;
            }
        };

        if len == 0 {
            trace!("produce returned 0 bytes, end of stream");
            return;
        }

        slot.fill(len);
        trace!(slot = slot.index(), len, "publishing chunk");
        if flow.publish(slot).is_err() {
            trace!("consumer hung up, stopping producer");
            return;
        }
    }

    trace!("stop requested, producer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow;
    use crate::slot::SlotRing;

    #[test]
    fn test_fill_loop_publishes_until_eof() {
        let mut ring = SlotRing::owned(4, 8);
        let (pflow, cflow) = flow::channels::<&str>(ring.slots());

        let mut calls = 0;
        fill_loop(pflow, |buf| {
            calls += 1;
            match calls {
                1 => {
                    buf[..2].copy_from_slice(b"aa");
                    Ok(2)
                }
                2 => {
                    buf[..3].copy_from_slice(b"bbb");
                    Ok(3)
                }
                _ => Ok(0),
            }
        });

        assert_eq!(cflow.next_filled().unwrap().unwrap().payload(), b"aa");
        assert_eq!(cflow.next_filled().unwrap().unwrap().payload(), b"bbb");
        assert!(cflow.next_filled().is_none(), "stream ends after EOF");
        assert_eq!(calls, 3, "EOF call itself is the last produce invocation");
    }

    #[test]
    fn test_fill_loop_forwards_fault() {
        let mut ring = SlotRing::owned(2, 8);
        let (pflow, cflow) = flow::channels::<&str>(ring.slots());

        fill_loop(pflow, |_buf| Err("broken"));

        match cflow.next_filled() {
            Some(Err(fault)) => assert_eq!(fault, "broken"),
            _ => panic!("expected the fault in band"),
        }
        assert!(cflow.next_filled().is_none(), "fault is terminal");
    }

    #[test]
    fn test_fill_loop_stops_after_consumer_hangup() {
        let mut ring = SlotRing::owned(2, 8);
        let (pflow, cflow) = flow::channels::<&str>(ring.slots());
        drop(cflow);

        let mut calls = 0;
        fill_loop(pflow, |buf| {
            calls += 1;
            buf.fill(0xAB);
            Ok(buf.len())
        });

        // One queued empty slot can still arrive before the failed publish
        // stops the loop.
        assert_eq!(calls, 1);
    }
}
