//! Crockford base32 decoding of the 26-character sortable part.
//!
//! Encoding is left to [`Ulid`]'s `Display`, which always emits the canonical
//! upper-case form. Decoding comes in two flavours:
//!
//! - [`DecodeMode::Strict`] accepts the 32 canonical symbols in either case
//!   and nothing else.
//! - [`DecodeMode::Lenient`] additionally maps the Crockford look-alikes
//!   `O` to `0` and `I`/`L` to `1` before decoding.
//!
//! Both modes reject input that is not exactly [`ENCODED_LEN`] bytes long and
//! values that do not fit into 128 bits.

use ulid::Ulid;

use crate::PulidError;

/// Length of an encoded ULID.
pub const ENCODED_LEN: usize = 26;

/// The canonical Crockford base32 alphabet.
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

const NO_VALUE: u8 = 0xFF;

const STRICT_TABLE: [u8; 256] = build_table(false);
const LENIENT_TABLE: [u8; 256] = build_table(true);

const fn build_table(lookalikes: bool) -> [u8; 256] {
    let mut table = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let symbol = ALPHABET[i];
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }

    if lookalikes {
        table[b'O' as usize] = 0;
        table[b'o' as usize] = 0;
        table[b'I' as usize] = 1;
        table[b'i' as usize] = 1;
        table[b'L' as usize] = 1;
        table[b'l' as usize] = 1;
    }

    table
}

/// How strictly the sortable part is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Canonicalize look-alike characters before decoding.
    #[default]
    Lenient,
    /// Reject anything outside the canonical alphabet.
    Strict,
}

impl DecodeMode {
    fn table(self) -> &'static [u8; 256] {
        match self {
            DecodeMode::Lenient => &LENIENT_TABLE,
            DecodeMode::Strict => &STRICT_TABLE,
        }
    }
}

/// Decodes a 26-character sortable part into its 128-bit value.
pub fn decode(encoded: &str, mode: DecodeMode) -> Result<Ulid, PulidError> {
    let bytes = encoded.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(PulidError::InvalidLength {
            expected: ENCODED_LEN,
            actual: bytes.len(),
        });
    }

    let table = mode.table();
    let mut value: u128 = 0;
    for (position, &byte) in bytes.iter().enumerate() {
        let digit = table[byte as usize];
        if digit == NO_VALUE {
            // Every earlier byte was ASCII, so `position` is a char boundary.
            let character = encoded[position..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(PulidError::InvalidCharacter {
                character,
                position,
            });
        }
        value = (value << 5) | u128::from(digit);
    }

    // 26 symbols carry 130 bits; the top two must be clear.
    if table[bytes[0] as usize] > 7 {
        return Err(PulidError::Overflow);
    }

    Ok(Ulid(value))
}
