//! Cipher parameter presets (component C2).
//!
//! `CipherParams` fixes the four degrees of freedom in the SIMON family:
//! word width `n`, key-word count `m`, round-constant-sequence selector
//! `j`, and round count `t`. The ten canonical variants are exposed as
//! `pub const` presets rather than a config file or loader — the same way
//! the teacher exposes its hash domains as a `const` table.

use crate::error::Error;

/// Immutable SIMON parameter set `{n, m, j, t}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherParams {
    /// Word width in bits. One of 16, 24, 32, 48, 64.
    pub n: u32,
    /// Number of words in the key.
    pub m: usize,
    /// Round-constant-sequence selector, 0..=4.
    pub j: usize,
    /// Number of rounds.
    pub t: usize,
}

impl CipherParams {
    /// Build a parameter set. Does not validate — call [`Self::validate`]
    /// at the boundary of any operation that depends on the invariants
    /// holding.
    #[must_use]
    pub const fn new(n: u32, m: usize, j: usize, t: usize) -> Self {
        Self { n, m, j, t }
    }

    /// Check the documented constraints: `n` a supported width, `m` in
    /// `2..=4`, `j` in `0..=4`, `t` strictly greater than `m`.
    pub fn validate(self) -> Result<(), Error> {
        if !matches!(self.n, 16 | 24 | 32 | 48 | 64) {
            return Err(Error::param_out_of_range(
                "n",
                format!("word width must be one of 16/24/32/48/64, got {}", self.n),
            ));
        }
        if !(2..=4).contains(&self.m) {
            return Err(Error::param_out_of_range(
                "m",
                format!("key-word count must be in 2..=4, got {}", self.m),
            ));
        }
        if self.j > 4 {
            return Err(Error::param_out_of_range(
                "j",
                format!("round-constant selector must be in 0..=4, got {}", self.j),
            ));
        }
        if self.t <= self.m {
            return Err(Error::param_out_of_range(
                "t",
                format!(
                    "round count {} must exceed key-word count {}",
                    self.t, self.m
                ),
            ));
        }
        Ok(())
    }

    /// Block size in bits (`2n`).
    #[must_use]
    pub const fn block_bits(self) -> u32 {
        2 * self.n
    }

    /// Key size in bits (`n * m`).
    #[must_use]
    pub const fn key_bits(self) -> u32 {
        self.n * self.m as u32
    }
}

/// SIMON-32/64.
pub const SIMON_32_64: CipherParams = CipherParams::new(16, 4, 0, 32);
/// SIMON-48/72.
pub const SIMON_48_72: CipherParams = CipherParams::new(24, 3, 0, 36);
/// SIMON-48/96.
pub const SIMON_48_96: CipherParams = CipherParams::new(24, 4, 1, 36);
/// SIMON-64/96.
pub const SIMON_64_96: CipherParams = CipherParams::new(32, 3, 2, 42);
/// SIMON-64/128, the primary target variant.
pub const SIMON_64_128: CipherParams = CipherParams::new(32, 4, 3, 44);
/// SIMON-96/96.
pub const SIMON_96_96: CipherParams = CipherParams::new(48, 2, 2, 52);
/// SIMON-96/144.
pub const SIMON_96_144: CipherParams = CipherParams::new(48, 3, 3, 54);
/// SIMON-128/128.
pub const SIMON_128_128: CipherParams = CipherParams::new(64, 2, 2, 68);
/// SIMON-128/192.
pub const SIMON_128_192: CipherParams = CipherParams::new(64, 3, 3, 69);
/// SIMON-128/256.
pub const SIMON_128_256: CipherParams = CipherParams::new(64, 4, 4, 72);

/// All ten canonical presets, in the order listed in the reference table.
pub const ALL_PRESETS: [CipherParams; 10] = [
    SIMON_32_64,
    SIMON_48_72,
    SIMON_48_96,
    SIMON_64_96,
    SIMON_64_128,
    SIMON_96_96,
    SIMON_96_144,
    SIMON_128_128,
    SIMON_128_192,
    SIMON_128_256,
];
