//! Fixed-length body encoder.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::warn;

use crate::protocol::{PayloadItem, SendError};

/// Encodes a body whose size was committed by `Content-Length`. Writing more
/// than the committed size is a protocol violation and is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    remaining: u64,
}

impl LengthEncoder {
    pub fn new(remaining: u64) -> Self {
        Self { remaining }
    }

    /// Whether the committed size has been written in full.
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(data) => {
                if !data.has_remaining() {
                    return Ok(());
                }

                let len = data.remaining() as u64;
                if len > self.remaining {
                    return Err(SendError::invalid_body(format!(
                        "payload exceeds the committed content-length by {} bytes",
                        len - self.remaining
                    )));
                }

                dst.put(data);
                self.remaining -= len;
            }
            PayloadItem::Eof => {
                if self.remaining > 0 {
                    warn!(missing = self.remaining, "fixed-length body ended early");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn writes_data_verbatim() {
        let mut encoder = LengthEncoder::new(11);
        let mut dst = BytesMut::new();

        encoder
            .encode(PayloadItem::Chunk(Bytes::from_static(b"hello ")), &mut dst)
            .unwrap();
        encoder
            .encode(PayloadItem::Chunk(Bytes::from_static(b"world")), &mut dst)
            .unwrap();

        assert_eq!(&dst[..], &b"hello world"[..]);
        assert!(encoder.is_finished());

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
        assert_eq!(&dst[..], &b"hello world"[..]);
    }

    #[test]
    fn rejects_overlong_payload() {
        let mut encoder = LengthEncoder::new(4);
        let mut dst = BytesMut::new();

        let result = encoder.encode(PayloadItem::Chunk(Bytes::from_static(b"hello")), &mut dst);
        assert!(matches!(result, Err(SendError::InvalidBody { .. })));
    }

    #[test]
    fn eof_before_the_committed_size_is_tolerated() {
        let mut encoder = LengthEncoder::new(10);
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::<Bytes>::Eof, &mut dst).unwrap();
        assert!(dst.is_empty());
        assert!(!encoder.is_finished());
    }
}
