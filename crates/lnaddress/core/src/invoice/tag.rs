use serde::Serialize;

/// Tagged-field types, keyed by their 5-bit code. A tag's letter is `'a'` offset by the code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagCode {
    /// `c` (2)
    MinFinalCltvExpiry,
    /// `d` (3)
    Description,
    /// `f` (5)
    FallbackAddress,
    /// `h` (7)
    DescriptionHash,
    /// `m` (12)
    PaymentMetadata,
    /// `n` (13)
    PayeePubkey,
    /// `p` (15)
    PaymentHash,
    /// `r` (17)
    RoutingHint,
    /// `s` (18)
    PaymentSecret,
    /// `x` (23)
    Expiry,
    Unknown(u8),
}

impl TagCode {
    /// Maps a 5-bit word to its tag. Values above 31 are masked to 5 bits.
    pub fn from_code(code: u8) -> Self {
        match code & 0x1f {
            2 => Self::MinFinalCltvExpiry,
            3 => Self::Description,
            5 => Self::FallbackAddress,
            7 => Self::DescriptionHash,
            12 => Self::PaymentMetadata,
            13 => Self::PayeePubkey,
            15 => Self::PaymentHash,
            17 => Self::RoutingHint,
            18 => Self::PaymentSecret,
            23 => Self::Expiry,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::MinFinalCltvExpiry => 2,
            Self::Description => 3,
            Self::FallbackAddress => 5,
            Self::DescriptionHash => 7,
            Self::PaymentMetadata => 12,
            Self::PayeePubkey => 13,
            Self::PaymentHash => 15,
            Self::RoutingHint => 17,
            Self::PaymentSecret => 18,
            Self::Expiry => 23,
            Self::Unknown(code) => code & 0x1f,
        }
    }

    /// Codes past 25 land beyond `z` (`{`, `|`, ... up to U+0080).
    pub fn letter(self) -> char {
        char::from(b'a' + self.code())
    }

    /// Key under which the decoded value is stored in [`super::Bolt11Invoice::fields`].
    pub fn field_name(self) -> String {
        match self {
            Self::MinFinalCltvExpiry => "min_final_cltv_expiry".to_string(),
            Self::Description => "description".to_string(),
            Self::FallbackAddress => "fallback_address".to_string(),
            Self::DescriptionHash => "description_hash".to_string(),
            Self::PaymentMetadata => "payment_metadata".to_string(),
            Self::PayeePubkey => "payee_pubkey".to_string(),
            Self::PaymentHash => "payment_hash".to_string(),
            Self::RoutingHint => "routing_hints".to_string(),
            Self::PaymentSecret => "payment_secret".to_string(),
            Self::Expiry => "expiry".to_string(),
            Self::Unknown(_) => format!("unknown_{}", self.letter()),
        }
    }
}

/// A decoded tagged-field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Hex(String),
    Text(String),
    Integer(u64),
    /// Routing hints, one opaque hex string per `r` field.
    HexList(Vec<String>),
    /// Raw 5-bit words of a field whose meaning is not interpreted.
    Words(Vec<u8>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Hex(s) | Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_round_trips_every_code() {
        for code in 0u8..32 {
            assert_eq!(TagCode::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_letters_are_offset_from_a() {
        let expected = [
            (TagCode::MinFinalCltvExpiry, 'c'),
            (TagCode::Description, 'd'),
            (TagCode::FallbackAddress, 'f'),
            (TagCode::DescriptionHash, 'h'),
            (TagCode::PaymentMetadata, 'm'),
            (TagCode::PayeePubkey, 'n'),
            (TagCode::PaymentHash, 'p'),
            (TagCode::RoutingHint, 'r'),
            (TagCode::PaymentSecret, 's'),
            (TagCode::Expiry, 'x'),
        ];
        for (tag, letter) in expected {
            assert_eq!(tag.letter(), letter, "{tag:?}");
            assert_eq!(TagCode::from_code(tag.code()), tag);
        }
    }

    #[test]
    fn test_code_three_is_description() {
        assert_eq!(TagCode::from_code(3), TagCode::Description);
        assert_eq!(TagCode::from_code(3).field_name(), "description");
        assert_eq!(TagCode::from_code(15).field_name(), "payment_hash");
    }

    #[test]
    fn test_unknown_tags_are_named_by_letter() {
        assert_eq!(TagCode::from_code(0), TagCode::Unknown(0));
        assert_eq!(TagCode::from_code(0).field_name(), "unknown_a");
        assert_eq!(TagCode::from_code(1).field_name(), "unknown_b");
        assert_eq!(TagCode::from_code(25).field_name(), "unknown_z");
        assert_eq!(TagCode::from_code(26).field_name(), "unknown_{");
    }
}
