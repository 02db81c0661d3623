use serde::Serialize;
use tracing::{debug, trace};

use super::codes::{FunctionCode, IinFlag};
use super::error::{DecodeError, Layer};
use super::layout;
use super::link::Direction;
use super::object::{ObjectHeader, decode_object};
use super::options::RangeWidths;
use super::reader::Dnp3Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppControl {
    pub raw: u8,
    pub fir: bool,
    pub fin: bool,
    pub confirm: bool,
    pub unsolicited: bool,
    pub sequence: u8,
}

impl AppControl {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            raw,
            fir: layout::flag(raw, layout::APP_FIR_MASK),
            fin: layout::flag(raw, layout::APP_FIN_MASK),
            confirm: layout::flag(raw, layout::APP_CON_MASK),
            unsolicited: layout::flag(raw, layout::APP_UNS_MASK),
            sequence: raw & layout::APP_SEQ_MASK,
        }
    }

    pub fn control_hex(&self) -> String {
        format!("0x{}", hex::encode([self.raw]))
    }
}

/// Internal indication word, first octet in the high byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Iin(pub u16);

impl Iin {
    pub fn value(self) -> u16 {
        self.0
    }

    /// Label lookup by the whole word.
    ///
    /// Only a word with exactly one indication set matches a table entry;
    /// any other word keeps an empty name. [`Iin::flags`] lists every bit.
    pub fn flag(self) -> IinFlag {
        IinFlag::from_code(self.0)
    }

    /// `"<name> (0x<4 hex digits>)"`.
    pub fn label(self) -> String {
        format!("{} (0x{})", self.flag().name(), hex::encode(self.0.to_be_bytes()))
    }

    pub fn flags(self) -> impl Iterator<Item = IinFlag> {
        (0..16u32)
            .rev()
            .map(|bit| 1u16 << bit)
            .filter(move |mask| self.0 & mask != 0)
            .map(IinFlag::from_code)
    }

    pub fn contains(self, flag: IinFlag) -> bool {
        flag.is_known() && self.0 & flag.code() != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationHeader {
    pub control: AppControl,
    pub function: FunctionCode,
    /// Present only on outstation-to-master frames.
    pub iin: Option<Iin>,
    pub object: Option<ObjectHeader>,
}

impl ApplicationHeader {
    /// Offset of the object header for a frame travelling in `direction`.
    pub fn object_offset(direction: Direction) -> usize {
        match direction {
            Direction::MasterToOutstation => layout::MASTER_OBJECT_OFFSET,
            Direction::OutstationToMaster => layout::OUTSTATION_OBJECT_OFFSET,
        }
    }
}

pub fn decode_application(
    reader: &Dnp3Reader<'_>,
    direction: Direction,
    widths: RangeWidths,
) -> Result<ApplicationHeader, DecodeError> {
    let control_byte = reader.read_u8(Layer::Application, layout::APP_CONTROL_OFFSET)?;
    let control = AppControl::from_byte(control_byte);
    let function_byte = reader.read_u8(Layer::Application, layout::APP_FUNCTION_OFFSET)?;
    let function = FunctionCode::from_code(function_byte);
    if !function.is_known() {
        debug!(code = function.code(), "unrecognized application function code");
    }

    let iin = match direction {
        Direction::OutstationToMaster => Some(Iin(
            reader.read_u16_be(Layer::Application, layout::IIN_RANGE.start)?,
        )),
        Direction::MasterToOutstation => None,
    };

    trace!(
        control = control.raw,
        function = %function.label(),
        iin = ?iin.map(Iin::value),
        "decoded application header"
    );

    let object = decode_object(reader, ApplicationHeader::object_offset(direction), widths)?;

    Ok(ApplicationHeader {
        control,
        function,
        iin,
        object,
    })
}

#[cfg(test)]
mod tests {
    use super::{AppControl, Iin, decode_application};
    use crate::protocols::dnp3::codes::{FunctionCode, IinFlag};
    use crate::protocols::dnp3::error::{DecodeError, Layer};
    use crate::protocols::dnp3::link::Direction;
    use crate::protocols::dnp3::options::RangeWidths;
    use crate::protocols::dnp3::reader::Dnp3Reader;

    const LINK: [u8; 10] = [0x05, 0x64, 0x0B, 0xC4, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00];

    fn frame(tail: &[u8]) -> Vec<u8> {
        let mut frame = LINK.to_vec();
        frame.push(0xC0);
        frame.extend_from_slice(tail);
        frame
    }

    #[test]
    fn control_bitfields() {
        let control = AppControl::from_byte(0xF5);
        assert!(control.fir);
        assert!(control.fin);
        assert!(control.confirm);
        assert!(control.unsolicited);
        assert_eq!(control.sequence, 5);
        assert_eq!(control.control_hex(), "0xf5");
    }

    #[test]
    fn master_frame_has_no_iin() {
        let payload = frame(&[0xC1, 0x01, 0x3C, 0x02, 0x06]);
        let reader = Dnp3Reader::new(&payload);
        let app = decode_application(&reader, Direction::MasterToOutstation, RangeWidths::Legacy)
            .unwrap();
        assert_eq!(app.function, FunctionCode::Read);
        assert_eq!(app.iin, None);
        let object = app.object.unwrap();
        assert_eq!(object.offset, 13);
        assert_eq!(object.group, 60);
        assert_eq!(object.variation, 2);
    }

    #[test]
    fn outstation_frame_reads_iin_and_shifts_objects() {
        let payload = frame(&[0xC1, 0x81, 0x80, 0x00, 0x01, 0x02, 0x00, 0x05, 0x09]);
        let reader = Dnp3Reader::new(&payload);
        let app = decode_application(&reader, Direction::OutstationToMaster, RangeWidths::Legacy)
            .unwrap();
        assert_eq!(app.function, FunctionCode::Response);
        let iin = app.iin.unwrap();
        assert_eq!(iin.value(), 0x8000);
        assert_eq!(iin.label(), "Device Restart (0x8000)");
        let object = app.object.unwrap();
        assert_eq!(object.offset, 15);
        assert_eq!(object.range_end, 20);
    }

    #[test]
    fn outstation_frame_without_iin_is_too_short() {
        let payload = frame(&[0xC1, 0x81, 0x80]);
        let reader = Dnp3Reader::new(&payload);
        let err = decode_application(&reader, Direction::OutstationToMaster, RangeWidths::Legacy)
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooShort {
                layer: Layer::Application,
                needed: 15,
                actual: 14,
            }
        );
    }

    #[test]
    fn missing_function_code_is_too_short() {
        let payload = frame(&[0xC1]);
        let reader = Dnp3Reader::new(&payload);
        let err = decode_application(&reader, Direction::MasterToOutstation, RangeWidths::Legacy)
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                layer: Layer::Application,
                needed: 13,
                ..
            }
        ));
    }

    #[test]
    fn header_only_frame_has_no_object() {
        let payload = frame(&[0xC1, 0x00]);
        let reader = Dnp3Reader::new(&payload);
        let app = decode_application(&reader, Direction::MasterToOutstation, RangeWidths::Legacy)
            .unwrap();
        assert_eq!(app.function, FunctionCode::Confirm);
        assert!(app.object.is_none());
    }

    #[test]
    fn multi_bit_iin_has_empty_label() {
        let iin = Iin(0x0102);
        assert_eq!(iin.flag(), IinFlag::Unmatched(0x0102));
        assert_eq!(iin.label(), " (0x0102)");
        let flags: Vec<_> = iin.flags().collect();
        assert_eq!(flags, vec![IinFlag::BroadcastReceived, IinFlag::ObjectUnknown]);
        assert!(iin.contains(IinFlag::ObjectUnknown));
        assert!(!iin.contains(IinFlag::DeviceRestart));
    }

    #[test]
    fn empty_iin() {
        let iin = Iin(0);
        assert_eq!(iin.label(), " (0x0000)");
        assert_eq!(iin.flags().count(), 0);
    }
}
