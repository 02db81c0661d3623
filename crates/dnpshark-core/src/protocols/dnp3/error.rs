use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Protocol layer being decoded when a read ran past the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Link,
    Transport,
    Application,
    Object,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Layer::Link => "link",
            Layer::Transport => "transport",
            Layer::Application => "application",
            Layer::Object => "object",
        };
        f.write_str(name)
    }
}

/// Which of the two link-layer addresses failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressField {
    Destination,
    Source,
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressField::Destination => f.write_str("destination"),
            AddressField::Source => f.write_str("source"),
        }
    }
}

/// Errors returned by DNP3 decoding.
///
/// Malformed content (unknown codes, reserved qualifiers, multi-bit IIN
/// words) never produces an error; only missing bytes, a wrong start field
/// or, when configured, an unparsable address do.
///
/// # Examples
/// ```
/// use dnpshark_core::{DecodeError, Layer, decode};
///
/// let err = decode(&[0x05, 0x64, 0x05]).unwrap_err();
/// assert!(matches!(err, DecodeError::TooShort { layer: Layer::Link, .. }));
/// assert!(err.to_string().contains("link layer too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{layer} layer too short: need {needed} bytes, got {actual}")]
    TooShort {
        layer: Layer,
        needed: usize,
        actual: usize,
    },
    #[error("not a DNP3 frame: start field 0x{start:04x}")]
    NotDnp3 { start: u16 },
    #[error("invalid {field} address: {text:?} is not a decimal number")]
    AddressParse { field: AddressField, text: String },
}
