use serde::Serialize;
use tracing::{debug, trace};

use super::codes::LinkFunction;
use super::error::{AddressField, DecodeError, Layer};
use super::layout;
use super::options::AddressParsing;
use super::reader::Dnp3Reader;

/// Physical direction of a frame, taken from the DIR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    MasterToOutstation,
    OutstationToMaster,
}

/// Decoded link control octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkControl {
    pub raw: u8,
    pub direction: Direction,
    pub primary: bool,
    pub frame_count_bit: bool,
    pub frame_count_valid: bool,
    pub function: LinkFunction,
}

impl LinkControl {
    pub fn from_byte(raw: u8) -> Self {
        let direction = if layout::flag(raw, layout::LINK_DIR_MASK) {
            Direction::MasterToOutstation
        } else {
            Direction::OutstationToMaster
        };
        let primary = layout::flag(raw, layout::LINK_PRM_MASK);
        Self {
            raw,
            direction,
            primary,
            frame_count_bit: layout::flag(raw, layout::LINK_FCB_MASK),
            frame_count_valid: layout::flag(raw, layout::LINK_FCV_MASK),
            function: LinkFunction::from_control(primary, raw & layout::LINK_FUNC_MASK),
        }
    }

    pub fn is_master(&self) -> bool {
        self.direction == Direction::MasterToOutstation
    }

    pub fn control_hex(&self) -> String {
        format!("0x{}", hex::encode([self.raw]))
    }
}

/// A link address as found on the wire.
///
/// `decimal` reproduces the long-standing analyzer reading: the two octets
/// are swapped, each rendered as unpadded lower-case hex, and the resulting
/// text is parsed as a decimal number. Use [`LinkAddress::value`] for the
/// protocol's own little-endian address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkAddress {
    pub octets: [u8; 2],
    pub decimal: u16,
}

impl LinkAddress {
    pub fn value(&self) -> u16 {
        u16::from_le_bytes(self.octets)
    }

    /// Text fed to the decimal parse, high octet first.
    pub fn swapped_text(octets: [u8; 2]) -> String {
        format!("{:x}{:x}", octets[1], octets[0])
    }

    fn parse(
        field: AddressField,
        octets: [u8; 2],
        parsing: AddressParsing,
    ) -> Result<Self, DecodeError> {
        let text = Self::swapped_text(octets);
        let decimal = match text.parse::<u16>() {
            Ok(decimal) => decimal,
            Err(_) => match parsing {
                AddressParsing::ZeroOnFailure => {
                    debug!(%field, %text, "link address is not decimal, recording 0");
                    0
                }
                AddressParsing::Strict => {
                    return Err(DecodeError::AddressParse { field, text });
                }
            },
        };
        Ok(Self { octets, decimal })
    }
}

/// The fixed 10-byte data link header.
///
/// `length` is captured verbatim and is not checked against the buffer, and
/// `crc` is never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkHeader {
    pub start: u16,
    pub length: u8,
    pub control: LinkControl,
    pub destination: LinkAddress,
    pub source: LinkAddress,
    pub crc: [u8; 2],
}

impl LinkHeader {
    pub fn start_hex(&self) -> String {
        format!("0x{}", hex::encode(self.start.to_be_bytes()))
    }

    /// CRC rendered high octet first; the wire carries it low octet first.
    pub fn crc_hex(&self) -> String {
        format!("0x{}", hex::encode([self.crc[1], self.crc[0]]))
    }
}

pub fn decode_link(
    reader: &Dnp3Reader<'_>,
    parsing: AddressParsing,
) -> Result<LinkHeader, DecodeError> {
    reader.require_len(Layer::Link, layout::LINK_HEADER_LEN)?;

    let start = reader.read_start_field()?;
    let length = reader.read_u8(Layer::Link, layout::LENGTH_OFFSET)?;
    let control_byte = reader.read_u8(Layer::Link, layout::LINK_CONTROL_OFFSET)?;
    let control = LinkControl::from_byte(control_byte);
    let destination = LinkAddress::parse(
        AddressField::Destination,
        reader.read_pair(Layer::Link, layout::DESTINATION_RANGE.start)?,
        parsing,
    )?;
    let source = LinkAddress::parse(
        AddressField::Source,
        reader.read_pair(Layer::Link, layout::SOURCE_RANGE.start)?,
        parsing,
    )?;
    let crc = reader.read_pair(Layer::Link, layout::CRC_RANGE.start)?;

    trace!(
        length,
        control = control.raw,
        function = %control.function.label(),
        destination = destination.decimal,
        source = source.decimal,
        "decoded link header"
    );

    Ok(LinkHeader {
        start,
        length,
        control,
        destination,
        source,
        crc,
    })
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Level;

    use super::{Direction, LinkAddress, LinkControl, decode_link};
    use crate::protocols::dnp3::codes::{LinkFunction, PrimaryFunction, SecondaryFunction};
    use crate::protocols::dnp3::error::{AddressField, DecodeError, Layer};
    use crate::protocols::dnp3::options::AddressParsing;
    use crate::protocols::dnp3::reader::Dnp3Reader;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn log_output(level: Level, run: impl FnOnce()) -> String {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn header(control: u8, destination: [u8; 2], source: [u8; 2]) -> [u8; 10] {
        [
            0x05,
            0x64,
            0x05,
            control,
            destination[0],
            destination[1],
            source[0],
            source[1],
            0x12,
            0x34,
        ]
    }

    #[test]
    fn control_c4_bitfields() {
        let control = LinkControl::from_byte(0xC4);
        assert_eq!(control.direction, Direction::MasterToOutstation);
        assert!(control.is_master());
        assert!(control.primary);
        assert!(!control.frame_count_bit);
        assert!(!control.frame_count_valid);
        assert_eq!(
            control.function,
            LinkFunction::Primary(PrimaryFunction::UnconfirmedUserData)
        );
        assert_eq!(control.function.label(), "Unconfirmed User Data (4)");
        assert_eq!(control.control_hex(), "0xc4");
    }

    #[test]
    fn control_secondary_ack() {
        let control = LinkControl::from_byte(0x30);
        assert_eq!(control.direction, Direction::OutstationToMaster);
        assert!(!control.primary);
        assert!(control.frame_count_bit);
        assert!(control.frame_count_valid);
        assert_eq!(control.function, LinkFunction::Secondary(SecondaryFunction::Ack));
        assert_eq!(control.control_hex(), "0x30");
    }

    #[test]
    fn address_swap_then_decimal() {
        let payload = header(0xC4, [0x01, 0x02], [0x03, 0x00]);
        let reader = Dnp3Reader::new(&payload);
        let link = decode_link(&reader, AddressParsing::ZeroOnFailure).unwrap();
        assert_eq!(LinkAddress::swapped_text([0x01, 0x02]), "21");
        assert_eq!(link.destination.decimal, 21);
        assert_eq!(link.destination.value(), 0x0201);
        assert_eq!(link.source.decimal, 3);
        assert_eq!(link.source.value(), 3);
    }

    #[test]
    fn address_with_hex_letter_is_zero() {
        let payload = header(0xC4, [0x0a, 0x00], [0x01, 0x00]);
        let reader = Dnp3Reader::new(&payload);
        let link = decode_link(&reader, AddressParsing::ZeroOnFailure).unwrap();
        assert_eq!(link.destination.decimal, 0);
        assert_eq!(link.destination.value(), 10);
    }

    #[test]
    fn address_fallback_stays_below_warn() {
        let payload = header(0xC4, [0x0a, 0x00], [0x01, 0x00]);
        let decode = || {
            let reader = Dnp3Reader::new(&payload);
            decode_link(&reader, AddressParsing::ZeroOnFailure).unwrap();
        };

        assert_eq!(log_output(Level::WARN, decode), "");
        let debug = log_output(Level::DEBUG, decode);
        assert!(debug.contains("link address is not decimal"));
        assert!(debug.contains("DEBUG"));
    }

    #[test]
    fn address_with_hex_letter_strict() {
        let payload = header(0xC4, [0x01, 0x00], [0xff, 0x00]);
        let reader = Dnp3Reader::new(&payload);
        let err = decode_link(&reader, AddressParsing::Strict).unwrap_err();
        assert_eq!(
            err,
            DecodeError::AddressParse {
                field: AddressField::Source,
                text: "0ff".to_string(),
            }
        );
    }

    #[test]
    fn hex_renderings() {
        let payload = header(0x44, [0x01, 0x00], [0x02, 0x00]);
        let reader = Dnp3Reader::new(&payload);
        let link = decode_link(&reader, AddressParsing::ZeroOnFailure).unwrap();
        assert_eq!(link.start_hex(), "0x0564");
        assert_eq!(link.crc_hex(), "0x3412");
        assert_eq!(link.length, 5);
    }

    #[test]
    fn short_header() {
        let payload = [0x05, 0x64, 0x05, 0xC4, 0x01, 0x00, 0x02, 0x00, 0x12];
        let reader = Dnp3Reader::new(&payload);
        let err = decode_link(&reader, AddressParsing::ZeroOnFailure).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                layer: Layer::Link,
                needed: 10,
                actual: 9,
            }
        ));
    }
}
