//! Body encoder dispatch.

use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::body::{ChunkedEncoder, LengthEncoder};
use crate::protocol::{PayloadItem, PayloadSize, SendError};

/// Encoder for one message body, picked from the framing the head was
/// committed to.
#[derive(Debug)]
pub struct PayloadEncoder {
    kind: Kind,
}

#[derive(Debug)]
enum Kind {
    Length(LengthEncoder),
    Chunked(ChunkedEncoder),
    NoBody,
}

impl PayloadEncoder {
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    pub fn chunked() -> Self {
        Self {
            kind: Kind::Chunked(ChunkedEncoder::new()),
        }
    }

    pub fn fixed_length(length: u64) -> Self {
        Self {
            kind: Kind::Length(LengthEncoder::new(length)),
        }
    }

    /// Whether the body this encoder was committed to is complete: the last
    /// chunk for chunked framing, the full size for fixed framing, at once
    /// for no body at all.
    pub fn is_finished(&self) -> bool {
        match &self.kind {
            Kind::Length(encoder) => encoder.is_finished(),
            Kind::Chunked(encoder) => encoder.is_finished(),
            Kind::NoBody => true,
        }
    }
}

impl From<PayloadSize> for PayloadEncoder {
    fn from(payload_size: PayloadSize) -> Self {
        match payload_size {
            PayloadSize::Length(n) => PayloadEncoder::fixed_length(n),
            PayloadSize::Chunked => PayloadEncoder::chunked(),
            PayloadSize::Empty => PayloadEncoder::empty(),
        }
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for PayloadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match &mut self.kind {
            Kind::Length(encoder) => encoder.encode(item, dst),
            Kind::Chunked(encoder) => encoder.encode(item, dst),
            // anything sent at a bodiless message is dropped
            Kind::NoBody => Ok(()),
        }
    }
}
