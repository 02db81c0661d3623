use serde::Serialize;
use tracing::trace;

use super::error::{DecodeError, Layer};
use super::layout;
use super::reader::Dnp3Reader;

/// Where a transport segment sits in its application fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Segment {
    Only,
    First,
    Middle,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransportHeader {
    pub raw: u8,
    pub fin: bool,
    pub fir: bool,
    /// Always within 0..=63.
    pub sequence: u8,
}

impl TransportHeader {
    pub fn from_byte(raw: u8) -> Self {
        Self {
            raw,
            fin: layout::flag(raw, layout::TRANSPORT_FIN_MASK),
            fir: layout::flag(raw, layout::TRANSPORT_FIR_MASK),
            sequence: raw & layout::TRANSPORT_SEQ_MASK,
        }
    }

    pub fn segment(&self) -> Segment {
        match (self.fir, self.fin) {
            (true, true) => Segment::Only,
            (true, false) => Segment::First,
            (false, false) => Segment::Middle,
            (false, true) => Segment::Last,
        }
    }

    /// True when this segment closes its fragment.
    pub fn completes_fragment(&self) -> bool {
        self.fin
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode([self.raw]))
    }
}

pub fn decode_transport(reader: &Dnp3Reader<'_>) -> Result<TransportHeader, DecodeError> {
    let raw = reader.read_u8(Layer::Transport, layout::TRANSPORT_OFFSET)?;
    let header = TransportHeader::from_byte(raw);
    trace!(
        fin = header.fin,
        fir = header.fir,
        sequence = header.sequence,
        "decoded transport header"
    );
    Ok(header)
}
