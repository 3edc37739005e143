//! Body decoder dispatch.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::body::{ChunkedDecoder, LengthDecoder};
use crate::protocol::{ParseError, PayloadItem, PayloadSize};

/// Decoder for one message body, picked from the framing the head announced.
///
/// Bodiless messages still produce a single [`PayloadItem::Eof`], keeping the
/// frame sequence uniform for every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Length(LengthDecoder),
    Chunked(ChunkedDecoder),
    NoBody,
}

impl PayloadDecoder {
    pub fn empty() -> Self {
        Self { kind: Kind::NoBody }
    }

    pub fn chunked() -> Self {
        Self {
            kind: Kind::Chunked(ChunkedDecoder::new()),
        }
    }

    pub fn fixed_length(length: u64) -> Self {
        Self {
            kind: Kind::Length(LengthDecoder::new(length)),
        }
    }
}

impl From<PayloadSize> for PayloadDecoder {
    fn from(payload_size: PayloadSize) -> Self {
        match payload_size {
            PayloadSize::Length(n) => PayloadDecoder::fixed_length(n),
            PayloadSize::Chunked => PayloadDecoder::chunked(),
            PayloadSize::Empty => PayloadDecoder::empty(),
        }
    }
}

impl Decoder for PayloadDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(decoder) => decoder.decode(src),
            Kind::Chunked(decoder) => decoder.decode(src),
            Kind::NoBody => Ok(Some(PayloadItem::Eof)),
        }
    }
}
