//! Word arithmetic (component C1).
//!
//! An n-bit word is carried in a 64-bit container with the high `64 - n`
//! bits always zero. Every function here ends with a mask to `n` bits so
//! that invariant holds across a public boundary, per spec §4.1.

/// Carrier type for an n-bit SIMON word, n ∈ {16, 24, 32, 48, 64}.
pub type Word = u64;

/// Mask with the low `n` bits set.
///
/// `n == 64` is handled separately because `u64::MAX >> (64 - 64)` would
/// shift by 64, which is undefined behaviour for a 64-bit shift.
#[must_use]
pub const fn mask_n(n: u32) -> Word {
    if n >= 64 {
        Word::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Mask a word to its low `n` bits.
#[must_use]
pub const fn clean(w: Word, n: u32) -> Word {
    w & mask_n(n)
}

/// n-bit complement: `(!w) & mask_n(n)`.
#[must_use]
pub const fn invert(w: Word, n: u32) -> Word {
    (!w) & mask_n(n)
}

/// Rotate an n-bit word left by `bits`, where `bits` may be negative for a
/// right rotation. `bits` is taken modulo `n`, so any integer shift amount
/// is accepted.
///
/// # Panics
///
/// Panics if `n == 0` or `n > 64` — both are programmer errors, never data
/// from a trace.
#[must_use]
pub fn rotate_left(w: Word, bits: i32, n: u32) -> Word {
    assert!(n > 0 && n <= 64, "word width must be in 1..=64, got {n}");
    let w = clean(w, n);
    let n_i = i64::from(n);
    // Reduce to a non-negative shift in [0, n).
    let shift = i64::from(bits).rem_euclid(n_i);
    if shift == 0 {
        return w;
    }
    let shift = shift as u32;
    let mask = mask_n(n);
    if n == 64 {
        w.rotate_left(shift)
    } else {
        ((w << shift) | (w >> (n - shift))) & mask
    }
}

/// Hamming weight (population count) of a word.
#[must_use]
pub const fn popcount(w: Word) -> u32 {
    w.count_ones()
}
