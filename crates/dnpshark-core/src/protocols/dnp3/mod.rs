//! DNP3 decoding.
//!
//! A frame is validated (length and start field), then decoded in a fixed
//! order: the 10-byte data link header, the transport octet at offset 10,
//! and the application header at offset 11. The link DIR bit decides whether
//! an IIN word follows the function code, which moves the first object
//! header from offset 13 to 15. The object qualifier's range-specifier code
//! fixes the width of the range field before anything past it is read.
//!
//! Unknown codes never fail: every table has a catch-all arm that keeps the
//! raw value. Errors only report missing bytes, a wrong start field, or an
//! unparsable address under strict options. The link CRC is captured, not
//! verified, and the declared link length is not checked.
//!
//! Offsets and masks live in `layout`, bounds-checked reads in `reader`,
//! label tables in `codes`.

pub mod application;
pub mod codes;
pub mod error;
pub mod layout;
pub mod link;
pub mod object;
pub mod options;
pub mod parser;
pub mod reader;
pub mod transport;

pub use parser::{DecodedFrame, decode, decode_with, looks_like_dnp3};
