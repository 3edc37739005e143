//! Chunk-sequence body decoder.
//!
//! Understands the chunked transfer coding of
//! [RFC 9112 section 7.1](https://www.rfc-editor.org/rfc/rfc9112.html#name-chunked-transfer-coding):
//! a hex size line with optional extensions, the data itself and a zero-sized
//! last chunk, optionally followed by trailer fields. Extensions and trailer
//! fields are consumed and dropped. Data is handed out as it arrives, so one
//! wire chunk may surface as several `Chunk` items.

use std::cmp;

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{ParseError, PayloadItem};

/// Streaming decoder for a chunk-framed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
    remaining: u64,
}

/// Position inside the chunk grammar. Every state except `ReadData` consumes
/// exactly one byte per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    SizeStart,
    ReadSize,
    SizeWs,
    SkipExtension,
    SizeLf,
    ReadData,
    DataCr,
    DataLf,
    SkipTrailer,
    TrailerLf,
    LastCr,
    LastLf,
    Done,
}

enum Step {
    Continue,
    Data(Bytes),
}

impl ChunkedDecoder {
    pub fn new() -> Self {
        Self {
            state: ChunkedState::SizeStart,
            remaining: 0,
        }
    }

    /// Runs one transition. The caller guarantees `src` is not empty and the
    /// state is not `Done`.
    fn step(&mut self, src: &mut BytesMut) -> Result<Step, ParseError> {
        use ChunkedState::*;

        if self.state == ReadData {
            return self.read_data(src);
        }

        let byte = src.get_u8();
        self.state = match (self.state, byte) {
            (SizeStart | ReadSize, b'0'..=b'9' | b'a'..=b'f' | b'A'..=b'F') => {
                self.push_size_digit(byte)?;
                ReadSize
            }
            // the size line is 1*HEXDIG, so an empty line is not a last chunk
            (SizeStart, _) => {
                return Err(ParseError::invalid_body("chunk size line starts without a hex digit"));
            }
            (ReadSize | SizeWs, b' ' | b'\t') => SizeWs,
            (ReadSize | SizeWs, b';') => SkipExtension,
            (ReadSize | SizeWs, b'\r') => SizeLf,
            (ReadSize | SizeWs, _) => {
                return Err(ParseError::invalid_body("chunk size is not a hex digit"));
            }

            (SkipExtension, b'\r') => SizeLf,
            (SkipExtension, b'\n') => {
                return Err(ParseError::invalid_body("bare LF inside chunk extension"));
            }
            (SkipExtension, _) => SkipExtension,

            (SizeLf, b'\n') if self.remaining == 0 => LastCr,
            (SizeLf, b'\n') => ReadData,
            (SizeLf, _) => {
                return Err(ParseError::invalid_body("chunk size line not ended by CRLF"));
            }

            (DataCr, b'\r') => DataLf,
            (DataLf, b'\n') => SizeStart,
            (DataCr | DataLf, _) => {
                return Err(ParseError::invalid_body("chunk data not ended by CRLF"));
            }

            (SkipTrailer, b'\r') => TrailerLf,
            (SkipTrailer, _) => SkipTrailer,
            (TrailerLf, b'\n') => LastCr,
            (TrailerLf, _) => {
                return Err(ParseError::invalid_body("trailer line not ended by CRLF"));
            }

            (LastCr, b'\r') => LastLf,
            // not the final CRLF, so a trailer field begins here
            (LastCr, _) => SkipTrailer,
            (LastLf, b'\n') => Done,
            (LastLf, _) => {
                return Err(ParseError::invalid_body("chunked body not ended by CRLF"));
            }

            (ReadData | Done, _) => unreachable!("handled before the byte was taken"),
        };
        Ok(Step::Continue)
    }

    /// Hands out as much of the current chunk's data as the buffer holds.
    /// Only entered with `remaining > 0`.
    fn read_data(&mut self, src: &mut BytesMut) -> Result<Step, ParseError> {
        let take = cmp::min(self.remaining, src.len() as u64) as usize;
        let data = src.split_to(take).freeze();

        self.remaining -= take as u64;
        if self.remaining == 0 {
            self.state = ChunkedState::DataCr;
        }

        trace!(len = data.len(), "read chunk data");
        Ok(Step::Data(data))
    }

    fn push_size_digit(&mut self, byte: u8) -> Result<(), ParseError> {
        let digit = match byte {
            b'0'..=b'9' => u64::from(byte - b'0'),
            b'a'..=b'f' => u64::from(byte - b'a' + 10),
            b'A'..=b'F' => u64::from(byte - b'A' + 10),
            _ => return Err(ParseError::invalid_body("chunk size is not a hex digit")),
        };

        self.remaining = self
            .remaining
            .checked_mul(16)
            .and_then(|size| size.checked_add(digit))
            .ok_or_else(|| ParseError::invalid_body("chunk size overflows a u64"))?;
        Ok(())
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for ChunkedDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if self.state == ChunkedState::Done {
                trace!("chunked body complete");
                return Ok(Some(PayloadItem::Eof));
            }

            if src.is_empty() {
                return Ok(None);
            }

            match self.step(src)? {
                Step::Continue => {}
                Step::Data(data) => return Ok(Some(PayloadItem::Chunk(data))),
            }
        }
    }
}
