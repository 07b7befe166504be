//! Extracting data back out of a dimension.

use super::{reduction_factor, KeyOil};

/// Extract the data embedded by [`embed`](super::embed) with the same oil and
/// `keep_constant_factor`.
///
/// Filler lengths are recomputed as `oil / factor` where the factor grows by
/// the reduction factor after every character and starts over at 1 once the
/// length it yields is zero. Extracting with a different oil does not fail; it
/// returns whatever symbols sit at the wrong offsets.
pub fn extract(dimension: &str, oil: KeyOil, keep_constant_factor: bool) -> String {
    let symbols: Vec<char> = dimension.chars().collect();
    let factor = reduction_factor(keep_constant_factor);
    let negative_oil = oil.negative() as usize;
    let positive_oil = oil.positive() as usize;

    let mut negative_factor = 1;
    let mut positive_factor = 1;
    let mut negative_step = negative_oil / negative_factor;
    let mut positive_step = positive_oil / positive_factor;
    let mut cursor = negative_step;
    let mut data = String::new();

    while cursor < symbols.len() {
        data.push(symbols[cursor]);
        cursor = cursor.saturating_add(positive_step);

        negative_factor *= factor;
        positive_factor *= factor;
        negative_step = negative_oil / negative_factor;
        positive_step = positive_oil / positive_factor;
        if negative_step == 0 {
            negative_factor = 1;
            negative_step = negative_oil / negative_factor;
        }
        if positive_step == 0 {
            positive_factor = 1;
            positive_step = positive_oil / positive_factor;
        }

        cursor = cursor.saturating_add(negative_step + 1);
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_oil_is_identity() {
        assert_eq!(extract("plain text", KeyOil::none(), false), "plain text");
        assert_eq!(extract("plain text", KeyOil::none(), true), "plain text");
    }

    #[test]
    fn test_empty_dimension() {
        assert_eq!(extract("", KeyOil::new(7, 3), false), "");
    }

    #[test]
    fn test_constant_factor() {
        assert_eq!(extract("--a+--b+--c+", KeyOil::new(2, 1), true), "abc");
    }

    #[test]
    fn test_shrinking_schedule() {
        // negative: 4, 2, 1   positive: 3, 1, 3
        let dimension = "####x+++##y+#z+++";
        assert_eq!(extract(dimension, KeyOil::new(4, 3), false), "xyz");
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(extract("¡ñ¿é", KeyOil::new(1, 0), true), "ñé");
    }

    #[test]
    fn test_truncated_dimension() {
        // Only the first character block is complete.
        assert_eq!(extract("####x+++##", KeyOil::new(4, 3), false), "x");
    }
}
