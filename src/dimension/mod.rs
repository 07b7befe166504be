//! Dimensions: data interleaved with oil.
//!
//! A dimension is the data string with random filler ("oil") woven around
//! each character. The filler amount shrinks and resets on a schedule fully
//! determined by the [`KeyOil`] and whether the reduction factor is applied,
//! so the data can be recovered from the dimension alone.

mod embed;
mod extract;
mod oil;

pub use embed::embed;
pub use extract::extract;
pub use oil::KeyOil;

use crate::config::DIMENSION_REDUCTION_FACTOR;

fn reduction_factor(keep_constant_factor: bool) -> usize {
    if keep_constant_factor {
        1
    } else {
        DIMENSION_REDUCTION_FACTOR
    }
}
