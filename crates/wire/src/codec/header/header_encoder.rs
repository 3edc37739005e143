//! Response head encoder.
//!
//! Serializes the status line and header section, reconciling the framing
//! headers with the payload size the response was committed to: a fixed size
//! pins `Content-Length`, chunk framing guarantees a `Transfer-Encoding`
//! ending in `chunked`, and an empty payload announces `Content-Length: 0`.

use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::{header, HeaderValue};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{declares_chunked, PayloadSize, ResponseHead, SendError, Version};
use crate::utils::DstWriter;

/// Initial space reserved for a serialized head section.
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encodes a response head committed to a given payload framing.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<(ResponseHead, PayloadSize)> for HeaderEncoder {
    type Error = SendError;

    fn encode(
        &mut self,
        item: (ResponseHead, PayloadSize),
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        let (mut head, payload_size) = item;

        dst.reserve(INIT_HEADER_SIZE);
        match head.version() {
            Version::HTTP_10 | Version::HTTP_11 => {
                let status = head.status();
                write!(
                    DstWriter(dst),
                    "{} {} {}\r\n",
                    head.version(),
                    status.as_str(),
                    status.canonical_reason().unwrap_or("")
                )?;
            }
            version => {
                error!(%version, "cannot serialize this http version");
                return Err(SendError::unsupported_version(version.to_string()));
            }
        }

        match payload_size {
            PayloadSize::Length(n) => {
                head.headers_mut().insert(header::CONTENT_LENGTH, n.into());
            }
            PayloadSize::Chunked => {
                // append keeps codings like "gzip" intact and makes chunked
                // the final one on its own line
                if !declares_chunked(head.headers()) {
                    head.headers_mut()
                        .append(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
                }
            }
            PayloadSize::Empty => {
                head.headers_mut()
                    .insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
            }
        }

        for (name, value) in head.headers().iter() {
            dst.put_slice(name.as_ref());
            dst.put_slice(b": ");
            dst.put_slice(value.as_ref());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
