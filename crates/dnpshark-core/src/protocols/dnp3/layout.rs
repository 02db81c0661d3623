pub const START_FIELD: u16 = 0x0564;

// Data link header.
pub const START_RANGE: std::ops::Range<usize> = 0..2;
pub const LENGTH_OFFSET: usize = 2;
pub const LINK_CONTROL_OFFSET: usize = 3;
pub const DESTINATION_RANGE: std::ops::Range<usize> = 4..6;
pub const SOURCE_RANGE: std::ops::Range<usize> = 6..8;
pub const CRC_RANGE: std::ops::Range<usize> = 8..10;
pub const LINK_HEADER_LEN: usize = 10;

pub const LINK_DIR_MASK: u8 = 0x80;
pub const LINK_PRM_MASK: u8 = 0x40;
pub const LINK_FCB_MASK: u8 = 0x20;
pub const LINK_FCV_MASK: u8 = 0x10;
pub const LINK_FUNC_MASK: u8 = 0x0F;

// Transport header.
pub const TRANSPORT_OFFSET: usize = 10;
pub const TRANSPORT_FIN_MASK: u8 = 0x80;
pub const TRANSPORT_FIR_MASK: u8 = 0x40;
pub const TRANSPORT_SEQ_MASK: u8 = 0x3F;

// Application header.
pub const APP_CONTROL_OFFSET: usize = 11;
pub const APP_FUNCTION_OFFSET: usize = 12;
pub const IIN_RANGE: std::ops::Range<usize> = 13..15;
pub const MASTER_OBJECT_OFFSET: usize = 13;
pub const OUTSTATION_OBJECT_OFFSET: usize = 15;

pub const APP_FIR_MASK: u8 = 0x80;
pub const APP_FIN_MASK: u8 = 0x40;
pub const APP_CON_MASK: u8 = 0x20;
pub const APP_UNS_MASK: u8 = 0x10;
pub const APP_SEQ_MASK: u8 = 0x0F;

// Object header, relative to the object start offset.
pub const QUALIFIER_OFFSET: usize = 2;
pub const OBJECT_HEADER_LEN: usize = 3;

pub const QUALIFIER_PREFIX_MASK: u8 = 0x70;
pub const QUALIFIER_PREFIX_SHIFT: u32 = 4;
pub const QUALIFIER_RANGE_MASK: u8 = 0x0F;

pub fn flag(byte: u8, mask: u8) -> bool {
    byte & mask != 0
}
