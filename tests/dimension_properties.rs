//! Property tests for the oil embedding schedule.

use merge_key::alphabet::SymbolAlphabet;
use merge_key::dimension::{embed, extract, KeyOil};
use merge_key::password::{self, PasswordQuality};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Length `embed` must produce: one block per character, filler shrinking by
/// `factor` and starting over at the oil length once it hits zero.
fn expected_length(chars: usize, oil: KeyOil, factor: usize) -> usize {
    let (negative_oil, positive_oil) = (oil.negative() as usize, oil.positive() as usize);
    let (mut negative, mut positive) = (negative_oil, positive_oil);
    let mut total = 0;
    for _ in 0..chars {
        total += negative + 1 + positive;
        negative /= factor;
        positive /= factor;
        if negative == 0 {
            negative = negative_oil;
        }
        if positive == 0 {
            positive = positive_oil;
        }
    }
    total
}

proptest! {
    #[test]
    fn extract_inverts_embed(
        data in "[^\n]{0,40}",
        negative in 0u32..300,
        positive in 0u32..300,
        keep_constant_factor in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let alphabet = SymbolAlphabet::standard();
        let oil = KeyOil::new(negative, positive);
        let mut rng = StdRng::seed_from_u64(seed);

        let dimension = embed(&alphabet, &data, oil, keep_constant_factor, &mut rng);
        prop_assert_eq!(extract(&dimension, oil, keep_constant_factor), data);
    }

    #[test]
    fn embed_length_follows_schedule(
        data in "[a-z0-9 ]{0,30}",
        negative in 0u32..500,
        positive in 0u32..500,
        keep_constant_factor in any::<bool>(),
    ) {
        let alphabet = SymbolAlphabet::standard();
        let oil = KeyOil::new(negative, positive);
        let factor = if keep_constant_factor { 1 } else { 2 };
        let mut rng = StdRng::seed_from_u64(0);

        let dimension = embed(&alphabet, &data, oil, keep_constant_factor, &mut rng);
        prop_assert_eq!(
            dimension.chars().count(),
            expected_length(data.chars().count(), oil, factor)
        );
    }

    #[test]
    fn quality_agrees_with_acceptance(candidate in "\\PC{0,24}") {
        let quality = password::quality(&candidate);
        prop_assert_eq!(quality == PasswordQuality::Unacceptable, !password::is_accepted(&candidate));
        if quality == PasswordQuality::Good {
            prop_assert!(candidate.chars().count() >= 16);
        }
    }
}
