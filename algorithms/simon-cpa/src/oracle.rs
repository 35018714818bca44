//! Prediction oracle (component C3): Hamming-weight predictions for
//! guessed key material, and the mask derivation that connects a
//! [`KeyHypothesis`] to the bits of an intermediate state it actually
//! determines.

use crate::error::Error;
use crate::hypothesis::KeyHypothesis;
use crate::matrix::Matrix;
use crate::simon::{eval_to_round, CipherParams, IntermediateKind};
use crate::word::{clean, popcount, rotate_left, Word};

/// `predict_hw(plaintexts, keys, r, mask, kind) -> HW[N,K]`.
///
/// Evaluates the cipher to round `r` under every guessed key, masks the
/// resulting intermediate to the bits the caller asserts are determined,
/// and returns the popcount of each masked cell.
pub fn predict_hw(
    params: CipherParams,
    plaintexts: &[(Word, Word)],
    keys: &[Vec<Word>],
    round: usize,
    mask: Word,
    kind: IntermediateKind,
) -> Result<Matrix<u32>, Error> {
    let states = eval_to_round(params, plaintexts, keys, round, kind)?;
    Ok(states.map(|state| popcount(state & mask)))
}

/// Derive the bits of the round-`r` intermediate that a hypothesis's
/// fixed key bits actually determine (spec §4.3).
///
/// Only defined for `round < params.m`: past the first `m` rounds the key
/// schedule has already mixed key words nonlinearly, and a caller-supplied
/// schedule is needed to reason about which bits are determined.
pub fn mask_for_hypothesis(
    params: CipherParams,
    hypothesis: &KeyHypothesis,
    round: usize,
    kind: IntermediateKind,
) -> Result<Word, Error> {
    if round >= params.m {
        return Err(Error::param_out_of_range(
            "round",
            format!(
                "mask derivation from raw key bits is only defined for round < m ({}); round {round} needs a caller schedule",
                params.m
            ),
        ));
    }
    if hypothesis.mask.len() != params.m {
        return Err(Error::shape_mismatch(
            "mask_for_hypothesis",
            format!("{} words", params.m),
            format!("{} words", hypothesis.mask.len()),
        ));
    }
    let key_mask = clean(hypothesis.mask[params.m - 1 - round], params.n);
    Ok(match kind {
        IntermediateKind::AddRoundKey => key_mask,
        IntermediateKind::AndGate => {
            rotate_left(key_mask, 1, params.n) & rotate_left(key_mask, 8, params.n)
        }
    })
}
