//! Bech32 (BIP-173) decoding into a human-readable part and 5-bit words.
//!
//! Framing rules are checked here so every failure carries a precise description; the checksum
//! itself is verified by the `bech32` crate.

use bech32::{Checksum, Fe32, primitives::decode::CheckedHrpstring};
use serde::Serialize;

use crate::error::DecodeError;

/// Maximum length of a bech32 string as defined by BIP-173.
pub const BECH32_MAX_LENGTH: usize = 90;

const SEPARATOR: char = '1';
const CHECKSUM_LENGTH: usize = 6;

/// Output of a successful decode. `hrp` is always lowercase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bech32Data {
    pub hrp: String,
    /// Data words preceding the checksum, each in `0..32`.
    pub words: Vec<u8>,
}

/// Decodes a BIP-173 bech32 string of at most [`BECH32_MAX_LENGTH`] characters.
pub fn decode(input: &str) -> Result<Bech32Data, DecodeError> {
    decode_with_limit::<bech32::Bech32>(input, BECH32_MAX_LENGTH)
}

/// Decodes `input` verifying the checksum `Ck`, rejecting strings longer than `max_len`.
pub fn decode_with_limit<Ck: Checksum>(
    input: &str,
    max_len: usize,
) -> Result<Bech32Data, DecodeError> {
    if input.len() > max_len {
        return Err(DecodeError::malformed(format!(
            "length {} exceeds the maximum of {max_len} characters",
            input.len()
        )));
    }
    if let Some(c) = input.chars().find(|c| !is_printable_ascii(*c)) {
        return Err(DecodeError::malformed(format!(
            "invalid character {c:?}"
        )));
    }
    let has_lower = input.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = input.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(DecodeError::malformed("mixed-case string"));
    }

    let Some(separator) = input.rfind(SEPARATOR) else {
        return Err(DecodeError::malformed("missing separator '1'"));
    };
    if separator == 0 {
        return Err(DecodeError::malformed("empty human-readable part"));
    }
    let data_part = &input[separator + 1..];
    if data_part.len() < CHECKSUM_LENGTH {
        return Err(DecodeError::malformed(format!(
            "checksum must be {CHECKSUM_LENGTH} characters, found {}",
            data_part.len()
        )));
    }

    let words = data_part
        .chars()
        .map(|c| {
            Fe32::from_char(c.to_ascii_lowercase())
                .map(Fe32::to_u8)
                .map_err(|_| DecodeError::malformed(format!("invalid data character '{c}'")))
        })
        .collect::<Result<Vec<u8>, DecodeError>>()?;

    CheckedHrpstring::new::<Ck>(input)
        .map_err(|e| DecodeError::malformed(format!("checksum verification failed: {e}")))?;

    let payload_len = words.len() - CHECKSUM_LENGTH;
    let mut words = words;
    words.truncate(payload_len);

    Ok(Bech32Data {
        hrp: input[..separator].to_ascii_lowercase(),
        words,
    })
}

fn is_printable_ascii(c: char) -> bool {
    ('!'..='~').contains(&c)
}

/// Repacks 5-bit words into bytes, big-endian. Trailing bits that do not fill a byte are dropped.
pub fn words_to_bytes(words: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;
    for word in words {
        buffer = (buffer << 5) | u32::from(word & 0x1f);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            #[allow(clippy::cast_possible_truncation)]
            bytes.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    bytes
}

/// Interprets words as a big-endian base-32 integer. `None` when the value overflows `u64`.
pub fn words_to_u64(words: &[u8]) -> Option<u64> {
    words.iter().try_fold(0u64, |acc, word| {
        acc.checked_mul(32)?.checked_add(u64::from(*word))
    })
}
