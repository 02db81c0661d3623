use serde::Serialize;
use tracing::{debug, trace};

use super::codes::{PrefixCode, RangeSpecifier};
use super::error::{DecodeError, Layer};
use super::layout;
use super::options::RangeWidths;
use super::reader::Dnp3Reader;

/// Object qualifier octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Qualifier {
    pub raw: u8,
    pub prefix: PrefixCode,
    pub range_specifier: RangeSpecifier,
}

impl Qualifier {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            raw,
            prefix: PrefixCode::from_code(
                (raw & layout::QUALIFIER_PREFIX_MASK) >> layout::QUALIFIER_PREFIX_SHIFT,
            ),
            range_specifier: RangeSpecifier::from_code(raw & layout::QUALIFIER_RANGE_MASK),
        }
    }
}

/// Decoded range field. Multi-octet values are little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Range {
    StartStop { start: u32, stop: u32 },
    AbsoluteAddress(u32),
    /// Code 6: the qualifier alone enumerates the objects.
    NoRange,
    Count(u32),
    FreeFormat { count: u8 },
    /// Reserved range-specifier code; no range field is read.
    Reserved,
    /// Range field left unread under [`RangeWidths::Legacy`].
    Unparsed,
}

impl Range {
    /// Number of points the range selects, when it states one.
    pub fn point_count(&self) -> Option<u64> {
        match *self {
            Range::StartStop { start, stop } => u64::from(stop)
                .checked_sub(u64::from(start))
                .map(|span| span + 1),
            Range::AbsoluteAddress(_) => Some(1),
            Range::Count(count) => Some(u64::from(count)),
            Range::FreeFormat { count } => Some(u64::from(count)),
            Range::NoRange | Range::Reserved | Range::Unparsed => None,
        }
    }
}

/// The first object header of an application fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObjectHeader {
    /// Offset of the object type field within the frame.
    pub offset: usize,
    pub type_field: [u8; 2],
    pub group: u8,
    pub variation: u8,
    pub qualifier: Qualifier,
    pub range: Range,
    /// Offset of the first byte after the range field.
    pub range_end: usize,
}

impl ObjectHeader {
    pub fn type_hex(&self) -> String {
        format!("0x{}", hex::encode(self.type_field))
    }

    pub fn range_width(&self) -> usize {
        self.range_end - (self.offset + layout::OBJECT_HEADER_LEN)
    }
}

/// Decode the object header at `offset`.
///
/// Returns `Ok(None)` unless the type, qualifier and resolved range field are
/// all present, so a truncated object never discards the layers above it.
pub fn decode_object(
    reader: &Dnp3Reader<'_>,
    offset: usize,
    widths: RangeWidths,
) -> Result<Option<ObjectHeader>, DecodeError> {
    if reader.len() <= offset {
        trace!(offset, "no object header");
        return Ok(None);
    }
    if reader.len() < offset + layout::OBJECT_HEADER_LEN {
        debug!(offset, available = reader.len() - offset, "partial object header skipped");
        return Ok(None);
    }

    let type_value = reader.read_u16_be(Layer::Object, offset)?;
    let [group, variation] = type_value.to_be_bytes();
    let qualifier_byte = reader.read_u8(Layer::Object, offset + layout::QUALIFIER_OFFSET)?;
    let qualifier = Qualifier::from_byte(qualifier_byte);

    let range_start = offset + layout::OBJECT_HEADER_LEN;
    let Some((range, width)) =
        decode_range(reader, qualifier.range_specifier, range_start, widths)?
    else {
        return Ok(None);
    };
    let range_end = range_start + width;

    trace!(
        group,
        variation,
        qualifier = qualifier.raw,
        prefix = %qualifier.prefix.label(),
        range_specifier = %qualifier.range_specifier.label(),
        range_end,
        "decoded object header"
    );

    Ok(Some(ObjectHeader {
        offset,
        type_field: [group, variation],
        group,
        variation,
        qualifier,
        range,
        range_end,
    }))
}

/// Resolve the range field width from the specifier, then read it.
///
/// `Ok(None)` when the frame ends inside the range field.
fn decode_range(
    reader: &Dnp3Reader<'_>,
    specifier: RangeSpecifier,
    at: usize,
    widths: RangeWidths,
) -> Result<Option<(Range, usize)>, DecodeError> {
    let width = specifier.field_width();
    if widths == RangeWidths::Legacy && specifier != RangeSpecifier::StartStop8 && width > 0 {
        debug!(code = specifier.code(), "range field left unparsed");
        return Ok(Some((Range::Unparsed, 0)));
    }
    if reader.len() < at + width {
        debug!(
            code = specifier.code(),
            width,
            available = reader.len() - at,
            "truncated range field, object header skipped"
        );
        return Ok(None);
    }

    let range = match specifier {
        RangeSpecifier::StartStop8 => Range::StartStop {
            start: u32::from(reader.read_u8(Layer::Object, at)?),
            stop: u32::from(reader.read_u8(Layer::Object, at + 1)?),
        },
        RangeSpecifier::StartStop16 => Range::StartStop {
            start: u32::from(reader.read_u16_le(Layer::Object, at)?),
            stop: u32::from(reader.read_u16_le(Layer::Object, at + 2)?),
        },
        RangeSpecifier::StartStop32 => Range::StartStop {
            start: reader.read_u32_le(Layer::Object, at)?,
            stop: reader.read_u32_le(Layer::Object, at + 4)?,
        },
        RangeSpecifier::Absolute8 => {
            Range::AbsoluteAddress(u32::from(reader.read_u8(Layer::Object, at)?))
        }
        RangeSpecifier::Absolute16 => {
            Range::AbsoluteAddress(u32::from(reader.read_u16_le(Layer::Object, at)?))
        }
        RangeSpecifier::Absolute32 => {
            Range::AbsoluteAddress(reader.read_u32_le(Layer::Object, at)?)
        }
        RangeSpecifier::NoRange => Range::NoRange,
        RangeSpecifier::Count8 => Range::Count(u32::from(reader.read_u8(Layer::Object, at)?)),
        RangeSpecifier::Count16 => Range::Count(u32::from(reader.read_u16_le(Layer::Object, at)?)),
        RangeSpecifier::Count32 => Range::Count(reader.read_u32_le(Layer::Object, at)?),
        RangeSpecifier::FreeFormat => Range::FreeFormat {
            count: reader.read_u8(Layer::Object, at)?,
        },
        RangeSpecifier::Reserved(code) => {
            debug!(code, "reserved range specifier");
            Range::Reserved
        }
    };
    Ok(Some((range, width)))
}
