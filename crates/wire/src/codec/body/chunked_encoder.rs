//! Chunk-sequence body encoder.
//!
//! Writes each payload chunk as a hex size line followed by the data, and the
//! end-of-message marker as the zero-sized last chunk. Trailer fields are not
//! produced.

use std::io::Write;

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::warn;

use crate::protocol::{PayloadItem, SendError};
use crate::utils::DstWriter;

/// Streaming encoder for a chunk-framed body.
#[derive(Debug, Default)]
pub struct ChunkedEncoder {
    finished: bool,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self { finished: false }
    }

    /// Whether the zero-sized last chunk has been written.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.finished {
            warn!("chunked body already terminated, dropping extra payload frame");
            return Ok(());
        }

        match item {
            PayloadItem::Chunk(data) => {
                // a zero-sized chunk would read as the end of the body
                if !data.has_remaining() {
                    return Ok(());
                }

                write!(DstWriter(dst), "{:X}\r\n", data.remaining())?;
                dst.reserve(data.remaining() + 2);
                dst.put(data);
                dst.put_slice(b"\r\n");
            }
            PayloadItem::Eof => {
                self.finished = true;
                dst.put_slice(b"0\r\n\r\n");
            }
        }
        Ok(())
    }
}
