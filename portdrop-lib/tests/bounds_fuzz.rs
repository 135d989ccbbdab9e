//! Adversarial bounds properties: no input, however random or truncated,
//! may crash the decoder or produce a spurious drop.

mod common;

use common::build_tcp_frame;
use portdrop_lib::{filter::tcp_dst_port, PortFilter, Verdict};
use proptest::prelude::*;

fn frame_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

proptest! {
    /// Arbitrary bytes never panic, and with nothing configured the
    /// verdict is always Pass.
    #[test]
    fn prop_arbitrary_bytes_fail_open(frame in frame_bytes()) {
        let filter = PortFilter::new();
        prop_assert_eq!(filter.process(&frame), Verdict::Pass);
        prop_assert_eq!(filter.drop_count(), 0);
    }

    /// With a configured port, arbitrary bytes never panic and the counter
    /// moves exactly when the verdict is Drop.
    #[test]
    fn prop_counter_tracks_verdicts(frame in frame_bytes(), port in any::<u16>()) {
        let filter = PortFilter::new();
        filter.blocked_port().set(port);
        let verdict = filter.process(&frame);
        let expected = u64::from(verdict == Verdict::Drop);
        prop_assert_eq!(filter.drop_count(), expected);
    }

    /// A drop implies the decoder actually saw the configured port.
    #[test]
    fn prop_drop_implies_decoded_match(frame in frame_bytes(), port in any::<u16>()) {
        let filter = PortFilter::new();
        filter.blocked_port().set(port);
        if filter.process(&frame) == Verdict::Drop {
            prop_assert_eq!(tcp_dst_port(&frame), Some(port));
        }
    }

    /// Every strict prefix of a valid matching frame passes: a frame cut
    /// anywhere before the end of the minimal TCP header can never drop.
    #[test]
    fn prop_truncations_never_drop(cut in 0usize..94, extra_words in 0u8..=10) {
        let frame = build_tcp_frame(8080, extra_words);
        prop_assume!(cut < frame.len());

        let filter = PortFilter::new();
        filter.blocked_port().set(8080);
        prop_assert_eq!(filter.process(&frame[..cut]), Verdict::Pass);
        prop_assert_eq!(filter.drop_count(), 0);
    }

    /// Corrupting any single byte never panics, and can only flip the
    /// verdict, never read out of bounds.
    #[test]
    fn prop_single_byte_corruption_is_harmless(pos in 0usize..54, byte in any::<u8>()) {
        let mut frame = build_tcp_frame(8080, 0);
        frame[pos] = byte;

        let filter = PortFilter::new();
        filter.blocked_port().set(8080);
        let verdict = filter.process(&frame);
        prop_assert!(verdict == Verdict::Pass || verdict == Verdict::Drop);
    }
}
