//! Decode configuration.
//!
//! Defaults reproduce the reference decoder byte for byte; each knob opts
//! into a stricter or more complete behavior.

use serde::{Deserialize, Serialize};

/// How many bytes each range-specifier code consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeWidths {
    /// Only code 0 (8-bit start/stop) reads its range field. Codes with a
    /// non-zero width decode as `Range::Unparsed` and advance by 0 bytes.
    #[default]
    Legacy,
    /// Every code reads the range field DNP3 assigns to it.
    Specified,
}

/// What to do when a link address does not survive the swap-then-decimal
/// parse (an octet rendered with a hex letter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressParsing {
    /// Record the decimal value as 0 and log at debug level.
    #[default]
    ZeroOnFailure,
    /// Fail with `DecodeError::AddressParse`.
    Strict,
}

/// Options accepted by [`decode_with`](crate::decode_with).
///
/// # Examples
/// ```
/// use dnpshark_core::{DecodeOptions, RangeWidths};
///
/// let options = DecodeOptions {
///     range_widths: RangeWidths::Specified,
///     ..DecodeOptions::default()
/// };
/// assert_ne!(options, DecodeOptions::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub range_widths: RangeWidths,
    pub address_parsing: AddressParsing,
}

impl DecodeOptions {
    /// Full range table and typed address errors.
    pub fn strict() -> Self {
        Self {
            range_widths: RangeWidths::Specified,
            address_parsing: AddressParsing::Strict,
        }
    }
}
