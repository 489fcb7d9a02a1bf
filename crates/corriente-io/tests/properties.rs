//! Property-based tests for the handoff buffer's FIFO and underrun
//! contracts under arbitrary interleaving granularity.

use corriente_io::HandoffBuffer;
use proptest::prelude::*;

proptest! {
    /// Appends of any granularity drain back as one concatenated FIFO run.
    #[test]
    fn drain_is_concatenation_of_appends(
        chunks in prop::collection::vec(
            prop::collection::vec(-1.0f32..=1.0, 0..64),
            0..16,
        ),
    ) {
        let buffer = HandoffBuffer::new();
        for chunk in &chunks {
            buffer.append(chunk);
        }

        let (drained, _) = buffer.drain_all();
        let expected: Vec<f32> = chunks.concat();
        prop_assert_eq!(drained, expected);
        prop_assert!(buffer.is_empty());
    }

    /// Successive takes of arbitrary sizes walk the queue front to back.
    #[test]
    fn takes_walk_the_queue_in_order(
        samples in prop::collection::vec(-1.0f32..=1.0, 1..256),
        sizes in prop::collection::vec(1usize..32, 1..16),
    ) {
        let buffer = HandoffBuffer::new();
        buffer.append(&samples);

        let mut cursor = 0;
        for &n in &sizes {
            match buffer.take(n) {
                Some(taken) => {
                    prop_assert_eq!(&taken[..], &samples[cursor..cursor + n]);
                    cursor += n;
                }
                None => {
                    // Short request: nothing was removed.
                    prop_assert!(samples.len() - cursor < n);
                    prop_assert_eq!(buffer.len(), samples.len() - cursor);
                }
            }
        }
    }

    /// A request exceeding the queue length removes nothing.
    #[test]
    fn short_take_leaves_queue_untouched(
        samples in prop::collection::vec(-1.0f32..=1.0, 0..64),
        extra in 1usize..64,
    ) {
        let buffer = HandoffBuffer::new();
        buffer.append(&samples);

        prop_assert_eq!(buffer.take(samples.len() + extra), None);
        prop_assert_eq!(buffer.len(), samples.len());

        let (drained, _) = buffer.drain_all();
        prop_assert_eq!(drained, samples);
    }
}
