use bytes::{Buf, Bytes};

use crate::protocol::MessageHead;

/// One event in a framing stream.
///
/// Each message travels as a head frame followed by payload frames, and every
/// message ends with [`PayloadItem::Eof`], bodiless ones included. The decoder
/// emits this sequence and the encoder consumes it, so the two sides can be
/// chained without special cases.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<T, D: Buf = Bytes> {
    Head(T),
    Payload(PayloadItem<D>),
}

impl<T, D: Buf> Frame<T, D> {
    pub fn is_head(&self) -> bool {
        matches!(self, Frame::Head(_))
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, Frame::Payload(_))
    }

    pub fn into_head(self) -> Option<T> {
        match self {
            Frame::Head(head) => Some(head),
            Frame::Payload(_) => None,
        }
    }

    pub fn into_payload(self) -> Option<PayloadItem<D>> {
        match self {
            Frame::Head(_) => None,
            Frame::Payload(item) => Some(item),
        }
    }
}

impl<T, D: Buf> From<PayloadItem<D>> for Frame<T, D> {
    fn from(item: PayloadItem<D>) -> Self {
        Frame::Payload(item)
    }
}

/// A piece of a message body, or the end-of-message marker.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadItem<D: Buf = Bytes> {
    Chunk(D),
    Eof,
}

impl<D: Buf> PayloadItem<D> {
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }

    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    pub fn into_chunk(self) -> Option<D> {
        match self {
            PayloadItem::Chunk(chunk) => Some(chunk),
            PayloadItem::Eof => None,
        }
    }
}

/// How a message body is framed on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Fixed size body, announced by `Content-Length`.
    Length(u64),
    /// Chunk sequence, announced by `Transfer-Encoding: chunked`.
    Chunked,
    /// No body at all.
    Empty,
}

impl PayloadSize {
    /// Framing implied by the head's own state: the observed chunked state
    /// wins, then non-empty inline content by its length, otherwise empty.
    ///
    /// The chunked check goes through [`MessageHead::is_chunked`], never the
    /// raw flag, so a `Transfer-Encoding: chunked` header picks chunk framing
    /// even when the flag was explicitly cleared.
    pub fn for_head<S>(head: &MessageHead<S>) -> PayloadSize {
        if head.is_chunked() {
            PayloadSize::Chunked
        } else if head.content().is_empty() {
            PayloadSize::Empty
        } else {
            PayloadSize::Length(head.content().len() as u64)
        }
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}
