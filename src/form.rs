//! Launch form field and wallet address validation

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fields on the token launch form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// 2..=25 UTF-16 units, ASCII letters and digits
    TokenName,
    /// 1..=8 UTF-16 units, ASCII letters
    TokenSymbol,
    /// 2..=250 UTF-16 units, anything
    TokenDescription,
}

#[derive(Clone, Copy)]
enum Charset {
    Alphanumeric,
    Alphabetic,
    Any,
}

impl Charset {
    fn admits(self, c: char) -> bool {
        match self {
            Charset::Alphanumeric => c.is_ascii_alphanumeric(),
            Charset::Alphabetic => c.is_ascii_alphabetic(),
            Charset::Any => true,
        }
    }
}

struct Rule {
    label: &'static str,
    min: usize,
    max: usize,
    charset: Charset,
    charset_error: &'static str,
}

impl FieldKind {
    fn rule(self) -> Rule {
        match self {
            FieldKind::TokenName => Rule {
                label: "Name",
                min: 2,
                max: 25,
                charset: Charset::Alphanumeric,
                charset_error: "Name must be alphanumeric only",
            },
            FieldKind::TokenSymbol => Rule {
                label: "Symbol",
                min: 1,
                max: 8,
                charset: Charset::Alphabetic,
                charset_error: "Symbol must be alphabets only",
            },
            FieldKind::TokenDescription => Rule {
                label: "Description",
                min: 2,
                max: 250,
                charset: Charset::Any,
                charset_error: "",
            },
        }
    }

    /// Inclusive length bounds, in UTF-16 code units
    pub fn length_bounds(self) -> (usize, usize) {
        let r = self.rule();
        (r.min, r.max)
    }
}

/// Outcome of validating one field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Whether the value passed every rule
    pub valid: bool,
    /// First rule that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self { Self { valid: true, error: None } }
    fn fail(msg: impl Into<String>) -> Self { Self { valid: false, error: Some(msg.into()) } }
}

/// Checks `value` against the rules for `kind`.
///
/// Rules run min length, max length, then charset; the first failure is reported.
/// Lengths count UTF-16 code units, so an emoji outside the BMP counts twice.
pub fn validate(kind: FieldKind, value: &str) -> Validation {
    let rule = kind.rule();
    let len = value.encode_utf16().count();
    if len < rule.min {
        let unit = if rule.min == 1 { "character" } else { "characters" };
        return Validation::fail(format!("{} must be at least {} {}", rule.label, rule.min, unit));
    }
    if len > rule.max {
        return Validation::fail(format!("{} must be no more than {} characters", rule.label, rule.max));
    }
    if !value.chars().all(|c| rule.charset.admits(c)) {
        return Validation::fail(rule.charset_error);
    }
    Validation::ok()
}

/// Recognised wallet address formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressFormat {
    /// `client|` followed by a 24-digit hex id
    GalaClient,
    /// `0x` followed by 40 hex digits
    Ethereum,
    /// Anything else
    Unknown,
}

/// Outcome of a wallet address check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressCheck {
    /// Whether the address is well formed
    pub valid: bool,
    /// Format the address was matched against
    pub format: AddressFormat,
    /// Why it was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

fn is_hex(s: &str) -> bool { !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit()) }

/// Classifies and validates a creator wallet address
pub fn validate_wallet_address(address: &str) -> AddressCheck {
    let check = |valid: bool, format, reason: &str| AddressCheck {
        valid,
        format,
        reason: (!valid).then(|| reason.to_string()),
    };

    let units = address.encode_utf16().count();
    if units < 10 {
        return check(false, AddressFormat::Unknown, "Address too short");
    }
    if let Some(client_id) = address.strip_prefix("client|") {
        let ok = client_id.encode_utf16().count() == 24 && is_hex(client_id);
        return check(ok, AddressFormat::GalaClient, "Invalid Gala client ID format");
    }
    if address.starts_with("0x") && units == 42 {
        return check(is_hex(&address[2..]), AddressFormat::Ethereum, "Invalid Ethereum address format");
    }
    check(false, AddressFormat::Unknown, "Unknown address format")
}
