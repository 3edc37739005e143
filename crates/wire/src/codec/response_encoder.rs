//! Response encoder.
//!
//! Consumes the same frame shape the decoder produces: a head frame carrying
//! the response and its declared framing, then payload frames ending with
//! [`PayloadItem::Eof`].
//!
//! The declared framing is reconciled with the head before anything is
//! written. A head whose observed chunked state is `true` goes out chunked no
//! matter what was declared, and non-empty inline content is written right
//! behind the head section. The end-of-message marker is accepted for every
//! framing, so bodiless messages may close with an `Eof` frame too.

use std::io;
use std::io::ErrorKind;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::codec::body::PayloadEncoder;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{Frame, PayloadItem, PayloadSize, ResponseHead, SendError};

/// Encodes responses from head and payload frames.
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    payload_encoder: Option<PayloadEncoder>,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self {
            header_encoder: HeaderEncoder,
            payload_encoder: None,
        }
    }
}

impl<D: Buf> Encoder<Frame<(ResponseHead, PayloadSize), D>> for ResponseEncoder {
    type Error = SendError;

    fn encode(
        &mut self,
        item: Frame<(ResponseHead, PayloadSize), D>,
        dst: &mut BytesMut,
    ) -> Result<(), Self::Error> {
        match item {
            Frame::Head((head, declared)) => {
                if self.payload_encoder.is_some() {
                    error!("response head while the previous body is still open");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                }

                // the observed chunked state outranks the declared framing:
                // a head that says chunked, by header or by flag, goes out
                // chunked
                let framing = if head.is_chunked() {
                    PayloadSize::Chunked
                } else {
                    declared
                };

                // masked to empty while chunked, so no inline write below
                let inline = head.content().clone();
                match framing {
                    PayloadSize::Length(n) if !inline.is_empty() && inline.len() as u64 != n => {
                        return Err(SendError::invalid_body(format!(
                            "inline content is {} bytes but the declared length is {n}",
                            inline.len()
                        )));
                    }
                    PayloadSize::Empty if !inline.is_empty() => {
                        return Err(SendError::invalid_body(
                            "framing declared empty but the head carries inline content",
                        ));
                    }
                    _ => {}
                }

                let mut payload_encoder = PayloadEncoder::from(framing);
                self.header_encoder.encode((head, framing), dst)?;

                if !inline.is_empty() {
                    payload_encoder.encode(PayloadItem::Chunk(inline), dst)?;
                }

                // keep the encoder only while something is left to stream
                if !payload_encoder.is_finished() {
                    self.payload_encoder = Some(payload_encoder);
                }
                Ok(())
            }

            Frame::Payload(payload_item) => {
                let Some(payload_encoder) = &mut self.payload_encoder else {
                    // a stray end marker is fine: the body was already closed
                    if payload_item.is_eof() {
                        return Ok(());
                    }
                    error!("payload chunk without a preceding response head");
                    return Err(io::Error::from(ErrorKind::InvalidInput).into());
                };

                let is_eof = payload_item.is_eof();
                let result = payload_encoder.encode(payload_item, dst);

                if is_eof || payload_encoder.is_finished() {
                    self.payload_encoder.take();
                }

                result
            }
        }
    }
}
