//! The SIMON block-cipher engine (component C2): parameter presets, key
//! schedule, encryption, and partial forward evaluation.

mod cipher;
mod constants;
mod params;

pub use cipher::{encrypt_block, eval_to_round, expand_key, expand_key_alt, IntermediateKind};
pub use params::{CipherParams, ALL_PRESETS, SIMON_128_128, SIMON_128_192, SIMON_128_256, SIMON_32_64,
    SIMON_48_72, SIMON_48_96, SIMON_64_128, SIMON_64_96, SIMON_96_144, SIMON_96_96};
