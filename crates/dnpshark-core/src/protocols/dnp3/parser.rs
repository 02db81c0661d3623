use serde::Serialize;
use tracing::{debug, debug_span};

use super::application::{ApplicationHeader, decode_application};
use super::error::{DecodeError, Layer};
use super::layout;
use super::link::{LinkHeader, decode_link};
use super::options::DecodeOptions;
use super::reader::Dnp3Reader;
use super::transport::{TransportHeader, decode_transport};

/// One DNP3 frame decoded across its link, transport and application layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedFrame<'a> {
    #[serde(skip)]
    contents: &'a [u8],
    pub link: LinkHeader,
    pub transport: TransportHeader,
    pub application: ApplicationHeader,
}

impl<'a> DecodedFrame<'a> {
    /// The bytes this frame was decoded from.
    pub fn contents(&self) -> &'a [u8] {
        self.contents
    }

    /// Always empty: object headers consume the application bytes.
    pub fn payload(&self) -> &'a [u8] {
        &[]
    }
}

/// Cheap pre-check for dispatchers: at least a link header and the start field.
///
/// # Examples
/// ```
/// use dnpshark_core::looks_like_dnp3;
///
/// assert!(looks_like_dnp3(&[0x05, 0x64, 0x05, 0xC0, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00]));
/// assert!(!looks_like_dnp3(&[0x05, 0x64]));
/// ```
pub fn looks_like_dnp3(buffer: &[u8]) -> bool {
    validate(&Dnp3Reader::new(buffer)).is_ok()
}

/// Decode one frame with the default options.
///
/// # Examples
/// ```
/// use dnpshark_core::{FunctionCode, decode};
///
/// let frame = [
///     0x05, 0x64, 0x0B, 0xC4, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, // link
///     0xC0, // transport
///     0xC1, 0x01, // application: read
///     0x3C, 0x02, 0x06, // class 1 data, all points
/// ];
/// let decoded = decode(&frame)?;
/// assert_eq!(decoded.application.function, FunctionCode::Read);
/// assert!(decoded.application.iin.is_none());
/// # Ok::<(), dnpshark_core::DecodeError>(())
/// ```
pub fn decode(buffer: &[u8]) -> Result<DecodedFrame<'_>, DecodeError> {
    decode_with(buffer, &DecodeOptions::default())
}

/// Decode one frame: validate, then link, transport and application in turn.
///
/// # Errors
/// `TooShort` names the layer whose bytes ran out, `NotDnp3` reports a wrong
/// start field, and `AddressParse` is only produced under strict address
/// parsing. No partial frame is returned; a truncated object header is not an
/// error and leaves `application.object` empty.
pub fn decode_with<'a>(
    buffer: &'a [u8],
    options: &DecodeOptions,
) -> Result<DecodedFrame<'a>, DecodeError> {
    let _span = debug_span!("dnp3_decode", len = buffer.len()).entered();
    let reader = Dnp3Reader::new(buffer);

    let result = decode_layers(&reader, buffer, options);
    if let Err(err) = &result {
        debug!(error = %err, "frame rejected");
    }
    result
}

fn decode_layers<'a>(
    reader: &Dnp3Reader<'a>,
    buffer: &'a [u8],
    options: &DecodeOptions,
) -> Result<DecodedFrame<'a>, DecodeError> {
    validate(reader)?;
    let link = decode_link(reader, options.address_parsing)?;
    let transport = decode_transport(reader)?;
    let application = decode_application(reader, link.control.direction, options.range_widths)?;

    Ok(DecodedFrame {
        contents: buffer,
        link,
        transport,
        application,
    })
}

fn validate(reader: &Dnp3Reader<'_>) -> Result<(), DecodeError> {
    reader.require_len(Layer::Link, layout::LINK_HEADER_LEN)?;
    let start = reader.read_start_field()?;
    if start != layout::START_FIELD {
        return Err(DecodeError::NotDnp3 { start });
    }
    Ok(())
}
