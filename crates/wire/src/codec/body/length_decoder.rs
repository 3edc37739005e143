//! Fixed-length body decoder.

use std::cmp;

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{ParseError, PayloadItem};

/// Decodes a body whose size was announced by `Content-Length`, handing data
/// out as it arrives and marking the end once the announced size is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    remaining: u64,
}

impl LengthDecoder {
    pub fn new(remaining: u64) -> Self {
        Self { remaining }
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.remaining == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        let take = cmp::min(self.remaining, src.len() as u64) as usize;
        let data = src.split_to(take).freeze();
        self.remaining -= take as u64;

        trace!(len = take, remaining = self.remaining, "read body data");
        Ok(Some(PayloadItem::Chunk(data)))
    }
}
