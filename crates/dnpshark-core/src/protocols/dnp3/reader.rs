use super::error::{DecodeError, Layer};
use super::layout;

/// Bounds-checked access to one frame. Every read names the layer it serves
/// so that a short buffer reports where decoding stopped.
pub struct Dnp3Reader<'a> {
    payload: &'a [u8],
}

impl<'a> Dnp3Reader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn require_len(&self, layer: Layer, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(self.too_short(layer, needed));
        }
        Ok(())
    }

    pub fn read_u8(&self, layer: Layer, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or_else(|| self.too_short(layer, offset + 1))
    }

    pub fn read_slice(
        &self,
        layer: Layer,
        range: std::ops::Range<usize>,
    ) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or_else(|| self.too_short(layer, range.end))
    }

    pub fn read_pair(&self, layer: Layer, offset: usize) -> Result<[u8; 2], DecodeError> {
        let bytes = self.read_slice(layer, offset..offset + 2)?;
        Ok([bytes[0], bytes[1]])
    }

    pub fn read_u16_be(&self, layer: Layer, offset: usize) -> Result<u16, DecodeError> {
        self.read_pair(layer, offset).map(u16::from_be_bytes)
    }

    pub fn read_u16_le(&self, layer: Layer, offset: usize) -> Result<u16, DecodeError> {
        self.read_pair(layer, offset).map(u16::from_le_bytes)
    }

    pub fn read_u32_le(&self, layer: Layer, offset: usize) -> Result<u32, DecodeError> {
        let bytes = self.read_slice(layer, offset..offset + 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Start field, read big-endian so that the magic compares as `0x0564`.
    pub fn read_start_field(&self) -> Result<u16, DecodeError> {
        self.read_u16_be(Layer::Link, layout::START_RANGE.start)
    }

    fn too_short(&self, layer: Layer, needed: usize) -> DecodeError {
        DecodeError::TooShort {
            layer,
            needed,
            actual: self.payload.len(),
        }
    }
}
