//! Embedding data into an oil-padded dimension.

use super::{reduction_factor, KeyOil};
use crate::alphabet::SymbolAlphabet;
use rand::Rng;

/// Embed `data` into a dimension string.
///
/// Each character is surrounded by random filler from the alphabet tier of
/// `data`: `negative` symbols before it and `positive` symbols after it. Both
/// start at the oil lengths and are divided by the reduction factor after
/// every character (by 1 when `keep_constant_factor` is set); a length that
/// reaches zero starts over from its oil length.
///
/// # Example
///
/// ```
/// use merge_key::alphabet::SymbolAlphabet;
/// use merge_key::dimension::{embed, extract, KeyOil};
///
/// let alphabet = SymbolAlphabet::standard();
/// let oil = KeyOil::new(3, 2);
/// let dimension = embed(&alphabet, "secret", oil, false, &mut rand::thread_rng());
///
/// assert!(dimension.chars().count() > "secret".len());
/// assert_eq!(extract(&dimension, oil, false), "secret");
/// ```
pub fn embed<R: Rng + ?Sized>(
    alphabet: &SymbolAlphabet,
    data: &str,
    oil: KeyOil,
    keep_constant_factor: bool,
    rng: &mut R,
) -> String {
    let factor = reduction_factor(keep_constant_factor);
    let tier = alphabet.classify(data);
    let negative_oil = oil.negative() as usize;
    let positive_oil = oil.positive() as usize;

    let mut negative = negative_oil;
    let mut positive = positive_oil;
    let mut dimension = String::with_capacity(data.len());

    for c in data.chars() {
        dimension.push_str(&alphabet.random_text(negative, tier, rng));
        dimension.push(c);
        dimension.push_str(&alphabet.random_text(positive, tier, rng));

        negative /= factor;
        positive /= factor;
        if negative == 0 {
            negative = negative_oil;
        }
        if positive == 0 {
            positive = positive_oil;
        }
    }

    dimension
}
