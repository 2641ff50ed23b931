//! BOLT11 payment request decoding.
//!
//! Only the bech32 envelope and the tagged fields are interpreted. The signature is skipped
//! and never verified.

mod tag;

use std::collections::BTreeMap;

use bech32::Checksum;
use serde::Serialize;

pub use tag::{FieldValue, TagCode};

use crate::codec::{self, words_to_bytes, words_to_u64};
use crate::error::DecodeError;
use crate::logger::{Logger, NoopLogger};
use crate::{log_debug, log_warn};

/// Words holding the creation timestamp at the start of the data part.
pub const TIMESTAMP_WORDS: usize = 7;
/// Words holding the recoverable signature at the end of the data part.
pub const SIGNATURE_WORDS: usize = 104;
/// Expiry applied when an invoice carries no `x` field.
pub const DEFAULT_EXPIRY_SECS: u64 = 3600;
/// Amount hint reported when the prefix does not carry one.
pub const NOT_AVAILABLE: &str = "n/a";

const URI_PREFIX: &str = "lightning:";
const MAINNET_PREFIX: &str = "lnbc";
const REGTEST_PREFIX: &str = "lnbcrt";

/// The bech32 checksum with the length restriction lifted, as BOLT11 requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bolt11Bech32 {}

impl Checksum for Bolt11Bech32 {
    type MidstateRepr = u32;
    const CODE_LENGTH: usize = 7089;
    const CHECKSUM_LENGTH: usize = bech32::Bech32::CHECKSUM_LENGTH;
    const GENERATOR_SH: [u32; 5] = bech32::Bech32::GENERATOR_SH;
    const TARGET_RESIDUE: u32 = bech32::Bech32::TARGET_RESIDUE;
}

/// A decoded payment request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Bolt11Invoice {
    network_prefix: String,
    amount_hint: String,
    timestamp: u64,
    fields: BTreeMap<String, FieldValue>,
}

impl Bolt11Invoice {
    /// The full human-readable part, for example `lnbc2500u`.
    pub fn network_prefix(&self) -> &str {
        &self.network_prefix
    }

    /// The amount portion of the prefix, or `n/a`. Only `lnbc` prefixes carry a hint; `lnbcrt`
    /// and amountless `lnbc` invoices report `n/a`.
    pub fn amount_hint(&self) -> &str {
        &self.amount_hint
    }

    /// Creation time in seconds since the Unix epoch.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn description(&self) -> Option<&str> {
        self.text_field(TagCode::Description)
    }

    pub fn description_hash(&self) -> Option<&str> {
        self.text_field(TagCode::DescriptionHash)
    }

    pub fn payment_hash(&self) -> Option<&str> {
        self.text_field(TagCode::PaymentHash)
    }

    pub fn payment_secret(&self) -> Option<&str> {
        self.text_field(TagCode::PaymentSecret)
    }

    pub fn payee_pubkey(&self) -> Option<&str> {
        self.text_field(TagCode::PayeePubkey)
    }

    pub fn fallback_address(&self) -> Option<&str> {
        self.text_field(TagCode::FallbackAddress)
    }

    pub fn min_final_cltv_expiry(&self) -> Option<u64> {
        self.field(&TagCode::MinFinalCltvExpiry.field_name())
            .and_then(FieldValue::as_u64)
    }

    pub fn routing_hints(&self) -> &[String] {
        match self.field(&TagCode::RoutingHint.field_name()) {
            Some(FieldValue::HexList(hints)) => hints,
            _ => &[],
        }
    }

    /// Expiry in seconds, [`DEFAULT_EXPIRY_SECS`] unless the invoice overrides it.
    pub fn expiry(&self) -> u64 {
        self.field(&TagCode::Expiry.field_name())
            .and_then(FieldValue::as_u64)
            .unwrap_or(DEFAULT_EXPIRY_SECS)
    }

    pub fn expires_at(&self) -> u64 {
        self.timestamp.saturating_add(self.expiry())
    }

    /// Interprets the amount hint as millisatoshis. `None` when the invoice carries no amount or
    /// the hint is not a valid BOLT11 amount.
    pub fn amount_msat(&self) -> Option<u64> {
        parse_amount_msat(&self.amount_hint)
    }

    fn text_field(&self, tag: TagCode) -> Option<&str> {
        self.field(&tag.field_name()).and_then(FieldValue::as_str)
    }
}

/// Decodes a BOLT11 string without logging.
pub fn decode(invoice: &str) -> Result<Bolt11Invoice, DecodeError> {
    decode_with_logger(invoice, &NoopLogger)
}

/// Decodes a BOLT11 string. Tagged fields are parsed leniently: a field whose declared length
/// runs past the tag area ends parsing and the fields read so far are kept.
pub fn decode_with_logger(invoice: &str, logger: &dyn Logger) -> Result<Bolt11Invoice, DecodeError> {
    let trimmed = invoice.trim();
    let normalized = trimmed
        .get(..URI_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(URI_PREFIX))
        .map_or(trimmed, |_| &trimmed[URI_PREFIX.len()..])
        .to_lowercase();

    let data = codec::decode_with_limit::<Bolt11Bech32>(&normalized, Bolt11Bech32::CODE_LENGTH)?;
    log_debug!(
        logger,
        "Decoded invoice with prefix {} and {} data words",
        data.hrp,
        data.words.len()
    );

    let required = TIMESTAMP_WORDS + SIGNATURE_WORDS;
    if data.words.len() < required {
        return Err(DecodeError::Truncated {
            words: data.words.len(),
            required,
        });
    }

    let timestamp = data.words[..TIMESTAMP_WORDS]
        .iter()
        .fold(0u64, |acc, word| (acc << 5) | u64::from(*word));
    let tagged = &data.words[TIMESTAMP_WORDS..data.words.len() - SIGNATURE_WORDS];
    let mut fields = parse_tagged_fields(tagged, logger);
    fields
        .entry(TagCode::Expiry.field_name())
        .or_insert(FieldValue::Integer(DEFAULT_EXPIRY_SECS));

    Ok(Bolt11Invoice {
        amount_hint: amount_hint(&data.hrp),
        network_prefix: data.hrp,
        timestamp,
        fields,
    })
}

fn amount_hint(hrp: &str) -> String {
    if hrp.starts_with(REGTEST_PREFIX) {
        return NOT_AVAILABLE.to_string();
    }
    match hrp.strip_prefix(MAINNET_PREFIX) {
        Some(amount) if !amount.is_empty() => amount.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn parse_amount_msat(hint: &str) -> Option<u64> {
    let (digits, multiplier) = match hint.chars().last()? {
        c if c.is_ascii_alphabetic() => (&hint[..hint.len() - 1], Some(c)),
        _ => (hint, None),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;
    match multiplier {
        None => amount.checked_mul(100_000_000_000),
        Some('m') => amount.checked_mul(100_000_000),
        Some('u') => amount.checked_mul(100_000),
        Some('n') => amount.checked_mul(100),
        Some('p') if amount % 10 == 0 => Some(amount / 10),
        Some(_) => None,
    }
}

fn parse_tagged_fields(mut words: &[u8], logger: &dyn Logger) -> BTreeMap<String, FieldValue> {
    let mut fields = BTreeMap::new();
    while words.len() >= 3 {
        let tag = TagCode::from_code(words[0]);
        let len = (usize::from(words[1]) << 5) | usize::from(words[2]);
        let Some(data) = words.get(3..3 + len) else {
            log_warn!(
                logger,
                "Field '{}' declares {len} words but only {} remain, ignoring the rest",
                tag.letter(),
                words.len() - 3
            );
            break;
        };
        log_debug!(logger, "Found field '{}' with {len} words", tag.letter());
        insert_field(&mut fields, tag, data, logger);
        words = &words[3 + len..];
    }
    fields
}

fn insert_field(
    fields: &mut BTreeMap<String, FieldValue>,
    tag: TagCode,
    data: &[u8],
    logger: &dyn Logger,
) {
    let value = match tag {
        TagCode::Description => {
            FieldValue::Text(String::from_utf8_lossy(&words_to_bytes(data)).into_owned())
        }
        TagCode::Expiry | TagCode::MinFinalCltvExpiry => {
            if let Some(value) = words_to_u64(data) {
                FieldValue::Integer(value)
            } else {
                log_warn!(logger, "Field '{}' overflows 64 bits, keeping raw words", tag.letter());
                fields.insert(
                    TagCode::Unknown(tag.code()).field_name(),
                    FieldValue::Words(data.to_vec()),
                );
                return;
            }
        }
        TagCode::RoutingHint => {
            let hint = hex::encode(words_to_bytes(data));
            if let FieldValue::HexList(hints) = fields
                .entry(tag.field_name())
                .or_insert_with(|| FieldValue::HexList(Vec::new()))
            {
                hints.push(hint);
            }
            return;
        }
        TagCode::Unknown(_) => FieldValue::Words(data.to_vec()),
        _ => FieldValue::Hex(hex::encode(words_to_bytes(data))),
    };
    fields.insert(tag.field_name(), value);
}
