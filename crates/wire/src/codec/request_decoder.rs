//! Request decoder.
//!
//! Turns raw bytes into the frame sequence of [`Frame`]: one head frame, zero
//! or more payload chunks and a final [`PayloadItem::Eof`], then starts over
//! for the next pipelined message.
//!
//! Bodies are delivered by size. A fixed-size body up to the inline limit is
//! buffered whole and handed out in the head's content, so most requests are
//! a single frame plus the end marker. Anything larger, and every chunk-framed
//! body, streams as payload frames behind a head whose chunked state is set.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use http1_wire::codec::RequestDecoder;
//! use http1_wire::protocol::{Frame, PayloadItem};
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut buffer = BytesMut::from("POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");
//!
//! let head = match decoder.decode(&mut buffer).unwrap() {
//!     Some(Frame::Head(head)) => head,
//!     other => panic!("expected a head frame, got {other:?}"),
//! };
//! assert_eq!(head.content(), "hello");
//! assert!(!head.is_chunked());
//!
//! // every message ends with an explicit end-of-message marker
//! assert!(matches!(
//!     decoder.decode(&mut buffer).unwrap(),
//!     Some(Frame::Payload(PayloadItem::Eof))
//! ));
//! ```

use std::mem;

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::body::{LengthDecoder, PayloadDecoder};
use crate::codec::header::HeaderDecoder;
use crate::protocol::{Frame, ParseError, PayloadItem, PayloadSize, RequestHead};

/// Largest fixed-size body delivered inline in the head's content buffer.
/// Beyond it the body streams as payload frames and the head's chunked flag is
/// set, without a `Transfer-Encoding` header appearing.
const MAX_INLINE_CONTENT: u64 = 8 * 1024;

/// Decodes requests into head and payload frames.
#[derive(Debug)]
pub struct RequestDecoder {
    header_decoder: HeaderDecoder,
    state: DecodeState,
}

#[derive(Debug)]
enum DecodeState {
    /// Waiting for (more of) the head section.
    Head,
    /// Buffering a fixed-size body small enough to deliver inline.
    FillContent {
        head: RequestHead,
        decoder: LengthDecoder,
        buffered: BytesMut,
    },
    /// Streaming payload frames after an emitted head.
    Stream(PayloadDecoder),
}

impl RequestDecoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self {
            header_decoder: HeaderDecoder,
            state: DecodeState::Head,
        }
    }
}

impl Decoder for RequestDecoder {
    type Item = Frame<RequestHead>;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match &mut self.state {
                DecodeState::Head => {
                    let Some((mut head, payload_size)) = self.header_decoder.decode(src)? else {
                        return Ok(None);
                    };

                    match payload_size {
                        PayloadSize::Length(n) if n <= MAX_INLINE_CONTENT => {
                            self.state = DecodeState::FillContent {
                                head,
                                decoder: LengthDecoder::new(n),
                                buffered: BytesMut::with_capacity(n as usize),
                            };
                            // loop to drain the body bytes already buffered
                        }
                        PayloadSize::Length(n) => {
                            trace!(length = n, "body exceeds the inline limit, streaming it");
                            head.set_chunked(true);
                            self.state = DecodeState::Stream(PayloadDecoder::fixed_length(n));
                            return Ok(Some(Frame::Head(head)));
                        }
                        PayloadSize::Chunked => {
                            self.state = DecodeState::Stream(PayloadDecoder::chunked());
                            return Ok(Some(Frame::Head(head)));
                        }
                        PayloadSize::Empty => {
                            self.state = DecodeState::Stream(PayloadDecoder::empty());
                            return Ok(Some(Frame::Head(head)));
                        }
                    }
                }

                DecodeState::FillContent {
                    decoder, buffered, ..
                } => {
                    let filled = loop {
                        match decoder.decode(src)? {
                            Some(PayloadItem::Chunk(data)) => buffered.extend_from_slice(&data),
                            Some(PayloadItem::Eof) => break true,
                            None => break false,
                        }
                    };

                    if !filled {
                        return Ok(None);
                    }

                    // body complete: hand out the filled head, then let the
                    // empty stream state emit the end-of-message marker
                    match mem::replace(
                        &mut self.state,
                        DecodeState::Stream(PayloadDecoder::empty()),
                    ) {
                        DecodeState::FillContent {
                            mut head, buffered, ..
                        } => {
                            head.set_content(buffered.freeze());
                            return Ok(Some(Frame::Head(head)));
                        }
                        _ => unreachable!("state checked above"),
                    }
                }

                DecodeState::Stream(payload_decoder) => {
                    return match payload_decoder.decode(src)? {
                        Some(item @ PayloadItem::Chunk(_)) => Ok(Some(Frame::Payload(item))),
                        Some(item @ PayloadItem::Eof) => {
                            // ready for the next pipelined message
                            self.state = DecodeState::Head;
                            Ok(Some(Frame::Payload(item)))
                        }
                        None => Ok(None),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use http::header::TRANSFER_ENCODING;
    use http::Method;
    use indoc::indoc;

    use super::*;
    use crate::protocol::Version;

    fn head_of(decoder: &mut RequestDecoder, src: &mut BytesMut) -> RequestHead {
        decoder
            .decode(src)
            .unwrap()
            .unwrap()
            .into_head()
            .expect("expected a head frame")
    }

    fn next_payload(decoder: &mut RequestDecoder, src: &mut BytesMut) -> PayloadItem {
        decoder
            .decode(src)
            .unwrap()
            .unwrap()
            .into_payload()
            .expect("expected a payload frame")
    }

    #[test]
    fn bodiless_request_is_head_then_eof() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: example.com

        "##};

        let mut src = BytesMut::from(str);
        let mut decoder = RequestDecoder::new();

        let head = head_of(&mut decoder, &mut src);
        assert_eq!(head.method(), &Method::GET);
        assert_eq!(head.version(), Version::HTTP_11);
        assert!(!head.is_chunked());
        assert!(head.content().is_empty());

        assert!(next_payload(&mut decoder, &mut src).is_eof());
        assert!(decoder.decode(&mut src).unwrap().is_none());
    }

    #[test]
    fn small_body_arrives_inline() {
        let str = indoc! {r##"
        POST /echo HTTP/1.1
        Content-Length: 11

        hello world"##};

        let mut src = BytesMut::from(str);
        let mut decoder = RequestDecoder::new();

        let head = head_of(&mut decoder, &mut src);
        assert!(!head.is_chunked());
        assert_eq!(head.content(), "hello world");

        assert!(next_payload(&mut decoder, &mut src).is_eof());
    }

    #[test]
    fn body_split_across_reads_is_buffered() {
        let mut src = BytesMut::from("POST /echo HTTP/1.1\r\nContent-Length: 5\r\n\r\nhel");
        let mut decoder = RequestDecoder::new();

        // head parsed but the body is short two bytes
        assert!(decoder.decode(&mut src).unwrap().is_none());

        src.extend_from_slice(b"lo");
        let head = head_of(&mut decoder, &mut src);
        assert_eq!(head.content(), "hello");
        assert!(next_payload(&mut decoder, &mut src).is_eof());
    }

    #[test]
    fn chunked_body_streams_behind_the_head() {
        let mut src = BytesMut::from(
            "POST /upload HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n6\r\n world\r\n0\r\n\r\n",
        );
        let mut decoder = RequestDecoder::new();

        let head = head_of(&mut decoder, &mut src);
        assert!(head.is_chunked());
        assert!(head.content().is_empty());

        assert_eq!(next_payload(&mut decoder, &mut src).into_chunk().unwrap(), "hello");
        assert_eq!(next_payload(&mut decoder, &mut src).into_chunk().unwrap(), " world");
        assert!(next_payload(&mut decoder, &mut src).is_eof());
    }

    #[test]
    fn oversized_body_streams_with_the_flag_set() {
        let length = MAX_INLINE_CONTENT as usize + 1;
        let mut src = BytesMut::from(
            format!("PUT /blob HTTP/1.1\r\nContent-Length: {length}\r\n\r\n").as_str(),
        );
        src.extend_from_slice(&vec![b'x'; length]);

        let mut decoder = RequestDecoder::new();
        let head = head_of(&mut decoder, &mut src);

        // chunk-sequence delivery was forced by the flag, not by a header
        assert!(head.is_chunked());
        assert!(head.headers().get(TRANSFER_ENCODING).is_none());
        assert!(head.content().is_empty());

        let mut total = 0;
        loop {
            match next_payload(&mut decoder, &mut src) {
                PayloadItem::Chunk(data) => total += data.len(),
                PayloadItem::Eof => break,
            }
        }
        assert_eq!(total, length);
    }

    #[test]
    fn pipelined_requests_decode_back_to_back() {
        let mut src = BytesMut::from(
            "GET /first HTTP/1.1\r\n\r\nGET /second HTTP/1.1\r\n\r\n",
        );
        let mut decoder = RequestDecoder::new();

        let head = head_of(&mut decoder, &mut src);
        assert_eq!(head.uri().path(), "/first");
        assert!(next_payload(&mut decoder, &mut src).is_eof());

        let head = head_of(&mut decoder, &mut src);
        assert_eq!(head.uri().path(), "/second");
        assert!(next_payload(&mut decoder, &mut src).is_eof());

        assert!(decoder.decode(&mut src).unwrap().is_none());
    }

    #[test]
    fn chunked_message_resets_for_the_next_one() {
        let mut src = BytesMut::from(
            "POST /upload HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\nGET /after HTTP/1.1\r\n\r\n",
        );
        let mut decoder = RequestDecoder::new();

        assert!(head_of(&mut decoder, &mut src).is_chunked());
        assert_eq!(next_payload(&mut decoder, &mut src).into_chunk().unwrap(), "hello");
        assert!(next_payload(&mut decoder, &mut src).is_eof());

        let head = head_of(&mut decoder, &mut src);
        assert_eq!(head.uri().path(), "/after");
        assert!(!head.is_chunked());
    }

    #[test]
    fn conflicting_framing_headers_error() {
        let str = indoc! {r##"
        POST /upload HTTP/1.1
        Transfer-Encoding: chunked
        Content-Length: 5

        "##};

        let mut src = BytesMut::from(str);
        let result = RequestDecoder::new().decode(&mut src);
        assert!(matches!(result, Err(ParseError::InvalidHeader { .. })));
    }
}
