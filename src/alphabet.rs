//! Symbol alphabet used for dimension filler.
//!
//! The alphabet is an ordered list of printable symbols split into four
//! nested tiers by index. Text is classified by the broadest tier any of its
//! characters needs, and filler for that text is drawn from the same tier so
//! it blends in with the embedded characters.

use rand::Rng;

/// Digits.
const NUMERIC_SYMBOLS: &str = "0123456789";

/// Letters plus the characters of plain sentences.
const SIMPLE_MSG_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz .,";

/// Remaining ASCII punctuation and common accented letters.
const COMMON_SYMBOLS: &str = "!\"#$%&'()*+-/:;<=>?@[\\]^_`{|}~áéíóúñ";

/// Remaining printable Latin-1 characters.
const ANY_SYMBOLS: &str = "¡¢£¤¥¦§¨©ª«¬®¯°±²³´µ¶·¸¹º»¼½¾¿ÀÁÂÃÄÅÆÇÈÉÊËÌÍ\
                           ÎÏÐÑÒÓÔÕÖ×ØÙÚÛÜÝÞßàâãäåæçèêëìîïðòôõö÷øùûüýþÿ";

/// Text classification by alphabet tier, from narrowest to broadest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextType {
    /// Digits only.
    Numeric,
    /// Letters, digits, space and basic sentence punctuation.
    SimpleMsg,
    /// Any ASCII printable character plus a few accented letters.
    Common,
    /// The whole alphabet.
    Any,
}

impl TextType {
    /// All tiers, narrowest first.
    pub const ALL: [TextType; 4] = [
        TextType::Numeric,
        TextType::SimpleMsg,
        TextType::Common,
        TextType::Any,
    ];
}

/// An immutable ordered alphabet partitioned into [`TextType`] tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAlphabet {
    symbols: Vec<char>,
    /// Last index (inclusive) of each tier, in [`TextType::ALL`] order.
    bounds: [usize; 4],
}

impl SymbolAlphabet {
    /// The standard 189-symbol alphabet.
    ///
    /// Tier bounds are 9, 64, 100 and 188.
    pub fn standard() -> Self {
        let mut symbols = Vec::with_capacity(200);
        let mut bounds = [0; 4];
        let tiers = [NUMERIC_SYMBOLS, SIMPLE_MSG_SYMBOLS, COMMON_SYMBOLS, ANY_SYMBOLS];
        for (bound, tier) in bounds.iter_mut().zip(tiers) {
            symbols.extend(tier.chars());
            *bound = symbols.len() - 1;
        }
        Self { symbols, bounds }
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols in order.
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Last index (inclusive) belonging to `tier`.
    pub fn upper_bound(&self, tier: TextType) -> usize {
        self.bounds[tier as usize]
    }

    /// Narrowest tier containing the symbol at `index`.
    pub fn tier_of(&self, index: usize) -> TextType {
        TextType::ALL
            .into_iter()
            .find(|tier| index <= self.upper_bound(*tier))
            .unwrap_or(TextType::Any)
    }

    /// Classify text by the broadest tier any of its characters belongs to.
    ///
    /// Text sharing no symbol with the alphabet is classified as
    /// [`TextType::Any`].
    pub fn classify(&self, text: &str) -> TextType {
        let mut reached = None;
        for (index, symbol) in self.symbols.iter().enumerate() {
            if !text.contains(*symbol) {
                continue;
            }
            let tier = self.tier_of(index);
            if tier == TextType::Any {
                return TextType::Any;
            }
            reached = reached.max(Some(tier));
        }
        reached.unwrap_or(TextType::Any)
    }

    /// Generate `length` symbols drawn uniformly from `tier`.
    pub fn random_text<R: Rng + ?Sized>(&self, length: usize, tier: TextType, rng: &mut R) -> String {
        let upper = self.upper_bound(tier);
        (0..length)
            .map(|_| self.symbols[rng.gen_range(0..=upper)])
            .collect()
    }
}

impl Default for SymbolAlphabet {
    fn default() -> Self {
        Self::standard()
    }
}
