//! dnpshark core library: best-effort decoding of DNP3 frames.
//!
//! One call decodes one frame's visible layers (data link, transport,
//! application and the first object header) from an immutable byte buffer
//! into a [`DecodedFrame`]. Decoding is synchronous, allocation-light and
//! side-effect free apart from `tracing` events; the label tables are static
//! data, so frames may be decoded from any number of threads at once.
//!
//! Invariants:
//! - Unknown codes decode to an explicit catch-all variant, never an error.
//! - The IIN word is `None` on master frames, never a fabricated zero.
//! - The range field width is resolved from the qualifier before any read
//!   past it.
//!
//! Every labelled field is exposed as a structured value; the `label()`
//! helpers render `"<name> (<code>)"` for humans and logs only.
//!
//! # Examples
//! ```
//! use dnpshark_core::{Direction, decode};
//!
//! let frame = [
//!     0x05, 0x64, 0x12, 0x44, 0x02, 0x00, 0x01, 0x00, 0x00, 0x00, // link
//!     0xC1, // transport
//!     0xC1, 0x81, 0x80, 0x00, // response, IIN: device restart
//!     0x01, 0x02, 0x00, 0x05, 0x09, // binary inputs 5..=9
//! ];
//! let decoded = decode(&frame)?;
//! assert_eq!(decoded.link.control.direction, Direction::OutstationToMaster);
//! assert_eq!(decoded.link.control.function.label(), "Unconfirmed User Data (4)");
//! let iin = decoded.application.iin.expect("outstation frames carry IIN");
//! assert_eq!(iin.label(), "Device Restart (0x8000)");
//! let object = decoded.application.object.expect("object header");
//! assert_eq!(object.range.point_count(), Some(5));
//! # Ok::<(), dnpshark_core::DecodeError>(())
//! ```

mod protocols;

pub use protocols::dnp3::application::{AppControl, ApplicationHeader, Iin};
pub use protocols::dnp3::codes::{
    FunctionCode, IinFlag, LinkFunction, PrefixCode, PrimaryFunction, RangeSpecifier,
    SecondaryFunction,
};
pub use protocols::dnp3::error::{AddressField, DecodeError, Layer};
pub use protocols::dnp3::link::{Direction, LinkAddress, LinkControl, LinkHeader};
pub use protocols::dnp3::object::{ObjectHeader, Qualifier, Range};
pub use protocols::dnp3::options::{AddressParsing, DecodeOptions, RangeWidths};
pub use protocols::dnp3::transport::{Segment, TransportHeader};
pub use protocols::dnp3::{DecodedFrame, decode, decode_with, looks_like_dnp3};

/// Minimum number of bytes a buffer needs before any field is read.
pub const MIN_FRAME_LEN: usize = protocols::dnp3::layout::LINK_HEADER_LEN;
/// DNP3 start field, read big-endian.
pub const START_FIELD: u16 = protocols::dnp3::layout::START_FIELD;
