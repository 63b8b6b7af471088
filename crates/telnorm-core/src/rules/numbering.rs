use crate::domain::phone::compact_phone;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Canonical prefix for Benin numbers under the ten-digit plan.
pub const NATIONAL_PREFIX: &str = "+22901";
/// Trunk prefix added in front of eight-digit local numbers.
pub const LOCAL_TRUNK_PREFIX: &str = "01";
/// Subscriber digits following [`NATIONAL_PREFIX`] in a migrated number.
pub const NATIONAL_SUBSCRIBER_DIGITS: usize = 8;
/// Leading two-digit blocks that identify an eight-digit local number.
/// Only ASCII digits form a block; other Unicode decimal digits never match.
pub const LOCAL_RANGE: RangeInclusive<u8> = 40..=99;

const COUNTRY_CODE_RULES: [(&str, NumberingRule); 3] = [
    ("00229", NumberingRule::InternationalPrefix),
    ("229", NumberingRule::BareCountryCode),
    ("+229", NumberingRule::PlusCountryCode),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingRule {
    /// Already `+22901` followed by eight digits; left as is.
    AlreadyNational,
    /// `00229...`
    InternationalPrefix,
    /// `229...`
    BareCountryCode,
    /// `+229...`
    PlusCountryCode,
    /// Local number whose first two digits fall in [`LOCAL_RANGE`].
    LocalNumber,
    /// No rule matched.
    Unmatched,
}

impl NumberingRule {
    pub fn label(self) -> &'static str {
        match self {
            NumberingRule::AlreadyNational => "already_national",
            NumberingRule::InternationalPrefix => "international_prefix",
            NumberingRule::BareCountryCode => "bare_country_code",
            NumberingRule::PlusCountryCode => "plus_country_code",
            NumberingRule::LocalNumber => "local_number",
            NumberingRule::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for NumberingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPhone {
    pub value: String,
    pub rule: NumberingRule,
}

/// Compacts `raw` and applies the numbering plan to the result.
pub fn normalize_phone(raw: &str) -> NormalizedPhone {
    apply_numbering_plan(&compact_phone(raw))
}

/// Applies the numbering plan to an already compacted value. The first
/// matching rule wins.
pub fn apply_numbering_plan(compact: &str) -> NormalizedPhone {
    if is_national(compact) {
        return NormalizedPhone {
            value: compact.to_string(),
            rule: NumberingRule::AlreadyNational,
        };
    }

    for (prefix, rule) in COUNTRY_CODE_RULES {
        if let Some(rest) = compact.strip_prefix(prefix) {
            return NormalizedPhone {
                value: format!("{NATIONAL_PREFIX}{rest}"),
                rule,
            };
        }
    }

    if leading_block(compact).is_some_and(|block| LOCAL_RANGE.contains(&block)) {
        return NormalizedPhone {
            value: format!("{LOCAL_TRUNK_PREFIX}{compact}"),
            rule: NumberingRule::LocalNumber,
        };
    }

    NormalizedPhone {
        value: compact.to_string(),
        rule: NumberingRule::Unmatched,
    }
}

fn is_national(value: &str) -> bool {
    value.strip_prefix(NATIONAL_PREFIX).is_some_and(|subscriber| {
        subscriber.len() == NATIONAL_SUBSCRIBER_DIGITS
            && subscriber.bytes().all(|b| b.is_ascii_digit())
    })
}

/// Two leading ASCII digits as a number.
fn leading_block(value: &str) -> Option<u8> {
    match value.as_bytes() {
        [tens, ones, ..] if tens.is_ascii_digit() && ones.is_ascii_digit() => {
            Some((tens - b'0') * 10 + (ones - b'0'))
        }
        _ => None,
    }
}
