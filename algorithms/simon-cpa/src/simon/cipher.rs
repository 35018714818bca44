//! Encryption, key schedule, and partial forward evaluation (component C2).

use crate::error::Error;
use crate::matrix::Matrix;
use crate::simon::constants::round_constant;
use crate::simon::params::CipherParams;
use crate::word::{clean, invert, mask_n, rotate_left, Word};

#[cfg(feature = "multithread")]
use rayon::prelude::*;

/// Which intermediate value a partial evaluation extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntermediateKind {
    /// The x-register immediately after round `r` (after XOR with the
    /// round key).
    AddRoundKey,
    /// The AND-gate output of round `r + 1`: `rot1(x) & rot8(x)`, where
    /// `x` is the x-register after round `r`.
    AndGate,
}

/// One round: `(x, y) -> (y ^ (rot1(x) & rot8(x)) ^ rot2(x) ^ round_key, x)`.
#[inline]
fn round(x: Word, y: Word, round_key: Word, n: u32) -> (Word, Word) {
    let new_x = y ^ (rotate_left(x, 1, n) & rotate_left(x, 8, n)) ^ rotate_left(x, 2, n) ^ round_key;
    (new_x, x)
}

/// Apply the first `rounds` entries of `round_keys` to `plaintext`.
fn apply_rounds(n: u32, plaintext: (Word, Word), round_keys: &[Word], rounds: usize) -> (Word, Word) {
    let mut x = clean(plaintext.0, n);
    let mut y = clean(plaintext.1, n);
    for round_key in round_keys.iter().take(rounds) {
        let (nx, ny) = round(x, y, *round_key, n);
        x = nx;
        y = ny;
    }
    (x, y)
}

/// Expand `key` (already known to have `params.m` words) into `upto` round
/// keys, clamped to `[params.m, params.t]`. This is the lazy partial
/// expansion `eval_to_round` relies on: scoring round `r` only ever needs
/// `r + 1` round-key words, not the full `T`-word schedule.
fn expand_key_partial(params: CipherParams, key: &[Word], upto: usize) -> Vec<Word> {
    let upto = upto.clamp(params.m, params.t);
    let n = params.n;
    let m = params.m;
    let mut k = vec![0 as Word; upto];
    for i in 0..m {
        k[i] = clean(key[m - 1 - i], n);
    }
    for i in m..upto {
        let mut tmp = rotate_left(k[i - 1], -3, n);
        if m == 4 {
            tmp ^= k[i - 3];
        }
        tmp ^= rotate_left(tmp, -1, n);
        let z_i = round_constant(params.j, (i - m) as u64);
        k[i] = clean(invert(k[i - m], n) ^ tmp ^ z_i ^ 3, n);
    }
    k
}

fn check_key_shape(params: CipherParams, key: &[Word], context: &'static str) -> Result<(), Error> {
    if key.len() != params.m {
        return Err(Error::shape_mismatch(
            context,
            format!("{} words", params.m),
            format!("{} words", key.len()),
        ));
    }
    Ok(())
}

/// Expand a full key into `params.t` round-key words (primary recursive
/// form, spec §4.2).
pub fn expand_key(params: CipherParams, key: &[Word]) -> Result<Vec<Word>, Error> {
    params.validate()?;
    check_key_shape(params, key, "expand_key")?;
    Ok(expand_key_partial(params, key, params.t))
}

/// Expand a full key using the algebraically-equivalent constant-`c` form
/// (`c = 2^n - 4`). Must agree bit-exactly with [`expand_key`] for every
/// preset and every key (testable property, spec §8).
pub fn expand_key_alt(params: CipherParams, key: &[Word]) -> Result<Vec<Word>, Error> {
    params.validate()?;
    check_key_shape(params, key, "expand_key_alt")?;
    let n = params.n;
    let m = params.m;
    let t = params.t;
    let c = mask_n(n) - 3;

    let mut k = vec![0 as Word; t];
    for i in 0..m {
        k[i] = clean(key[m - 1 - i], n);
    }
    for i in 0..(t - m) {
        let z_i = round_constant(params.j, i as u64);
        let new_word = match m {
            2 => {
                let tmp1 = rotate_left(k[i + 1], -3, n);
                let tmp2 = rotate_left(tmp1, -1, n);
                c ^ z_i ^ k[i] ^ tmp1 ^ tmp2
            }
            3 => {
                let tmp1 = rotate_left(k[i + 2], -3, n);
                let tmp2 = rotate_left(tmp1, -1, n);
                c ^ z_i ^ k[i] ^ tmp1 ^ tmp2
            }
            _ => {
                let tmp1 = rotate_left(k[i + 3], -3, n) ^ k[i + 1];
                let tmp2 = rotate_left(tmp1, -1, n);
                c ^ z_i ^ k[i] ^ tmp1 ^ tmp2
            }
        };
        k[i + m] = clean(new_word, n);
    }
    Ok(k)
}

/// Encrypt one block under `key`.
pub fn encrypt_block(params: CipherParams, plaintext: (Word, Word), key: &[Word]) -> Result<(Word, Word), Error> {
    let round_keys = expand_key(params, key)?;
    Ok(apply_rounds(params.n, plaintext, &round_keys, params.t))
}

/// Run rounds `0..=round` for every (plaintext, key) pair and extract the
/// requested intermediate, producing an `N×K` matrix.
///
/// `keys` is a `K`-long list, each entry a full `m`-word key (a guessed or
/// partially-zero hypothesis key, not a pre-expanded round-key array).
pub fn eval_to_round(
    params: CipherParams,
    plaintexts: &[(Word, Word)],
    keys: &[Vec<Word>],
    round_idx: usize,
    kind: IntermediateKind,
) -> Result<Matrix<Word>, Error> {
    params.validate()?;
    if round_idx >= params.t {
        return Err(Error::param_out_of_range(
            "round",
            format!("round {round_idx} must be < t ({})", params.t),
        ));
    }
    for (idx, key) in keys.iter().enumerate() {
        if key.len() != params.m {
            return Err(Error::shape_mismatch(
                "eval_to_round",
                format!("{} words per key", params.m),
                format!("key {idx} has {} words", key.len()),
            ));
        }
    }

    let needed_rounds = round_idx + 1;
    let n = params.n;

    let per_key = |key: &Vec<Word>| -> Vec<Word> { expand_key_partial(params, key, needed_rounds) };

    #[cfg(feature = "multithread")]
    let round_keys_per_col: Vec<Vec<Word>> = keys.par_iter().map(per_key).collect();
    #[cfg(not(feature = "multithread"))]
    let round_keys_per_col: Vec<Vec<Word>> = keys.iter().map(per_key).collect();

    let mut out = Matrix::zeros(plaintexts.len(), keys.len());
    for (col, round_keys) in round_keys_per_col.iter().enumerate() {
        for (row, plaintext) in plaintexts.iter().enumerate() {
            let (x, _y) = apply_rounds(n, *plaintext, round_keys, needed_rounds);
            let cell = match kind {
                IntermediateKind::AddRoundKey => x,
                IntermediateKind::AndGate => rotate_left(x, 1, n) & rotate_left(x, 8, n),
            };
            out.set(row, col, cell);
        }
    }
    Ok(out)
}
