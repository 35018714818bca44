//! Key hypotheses and their expansion/pruning (component C5).

use crate::error::Error;
use crate::simon::CipherParams;
use crate::word::{clean, Word};

/// A partial key guess plus the evidence gathered for it so far.
///
/// `key` holds guessed bit values in the positions `mask` marks as fixed;
/// unguessed bits are zero in both. `corr` is the peak signed correlation
/// from the last time this hypothesis was scored (0.0 if never scored).
#[derive(Debug, Clone, PartialEq)]
pub struct KeyHypothesis {
    /// Guessed key words, `m` of them. Bits outside `mask` are zero.
    pub key: Vec<Word>,
    /// Bitmask over key words: a 1-bit means that bit of the key is fixed
    /// by this hypothesis.
    pub mask: Vec<Word>,
    /// Peak signed correlation observed when this hypothesis was last
    /// scored. `argmax_{|c|} c` over the correlation row, so the sign is
    /// preserved.
    pub corr: f64,
}

impl KeyHypothesis {
    /// The empty seed hypothesis `{key=0, mask=0, corr=0}` a search starts
    /// from.
    #[must_use]
    pub fn seed(m: usize) -> Self {
        Self {
            key: vec![0; m],
            mask: vec![0; m],
            corr: 0.0,
        }
    }
}

/// Expand `h` into `2^popcount(new_mask & !h.mask)` children, one per
/// assignment of the newly-covered bits.
///
/// Children are enumerated word-by-word from the highest key-word index
/// down to 0, and bit 0 up to `n-1` within each word; the LSB of the child
/// index selects the lowest newly-covered bit in that walk order (spec
/// §4.5). For the common case of guessing one additional byte, this
/// produces 256 children.
pub fn expand(params: CipherParams, h: &KeyHypothesis, new_mask: &[Word]) -> Result<Vec<KeyHypothesis>, Error> {
    let m = params.m;
    let n = params.n;
    if h.key.len() != m || h.mask.len() != m {
        return Err(Error::shape_mismatch(
            "hypothesis::expand",
            format!("{m} words"),
            format!("key has {} words, mask has {} words", h.key.len(), h.mask.len()),
        ));
    }
    if new_mask.len() != m {
        return Err(Error::shape_mismatch(
            "hypothesis::expand",
            format!("{m} words"),
            format!("new_mask has {} words", new_mask.len()),
        ));
    }
    for i in 0..m {
        if clean(h.mask[i] & !new_mask[i], n) != 0 {
            return Err(Error::param_out_of_range(
                "new_mask",
                format!("word {i} of new_mask is not a superset of h.mask"),
            ));
        }
    }

    let mut new_bits: Vec<(usize, u32)> = Vec::new();
    for word_idx in (0..m).rev() {
        let newly = clean(new_mask[word_idx] & !h.mask[word_idx], n);
        for bit in 0..n {
            if (newly >> bit) & 1 == 1 {
                new_bits.push((word_idx, bit));
            }
        }
    }

    let b = new_bits.len() as u32;
    let count = 1usize << b;
    let mut children = Vec::with_capacity(count);
    for i in 0..count {
        let mut key = h.key.clone();
        for (bit_pos, &(word_idx, bit)) in new_bits.iter().enumerate() {
            let bit_val = (i >> bit_pos) & 1;
            if bit_val == 1 {
                key[word_idx] |= 1 << bit;
            } else {
                key[word_idx] &= !(1 << bit);
            }
        }
        children.push(KeyHypothesis {
            key,
            mask: new_mask.to_vec(),
            corr: 0.0,
        });
    }
    Ok(children)
}

/// Keep hypotheses within `threshold` correlation units of the best one:
/// `|h.corr| > max_g |g.corr| - threshold`.
#[must_use]
pub fn filter(hypotheses: Vec<KeyHypothesis>, threshold: f64) -> Vec<KeyHypothesis> {
    let Some(best) = hypotheses.iter().map(|h| h.corr.abs()).fold(None, |acc, v| {
        Some(acc.map_or(v, |a: f64| a.max(v)))
    }) else {
        return hypotheses;
    };
    hypotheses
        .into_iter()
        .filter(|h| h.corr.abs() > best - threshold)
        .collect()
}
