//! A sans-I/O HTTP/1.x message model and streaming codec
//!
//! This crate models HTTP/1.x messages at the framing level and converts them
//! to and from raw bytes, without owning a socket or a runtime. It slots into
//! anything that can feed it buffers: a tokio `Framed` transport, a test
//! harness, or a hand-rolled read loop.
//!
//! # Features
//!
//! - One message model for requests and responses, generic over the subject
//!   line
//! - Chunked transfer coding, with the chunked state re-derived from the
//!   headers on every read
//! - Content-Length based bodies, delivered inline when small and streamed
//!   when large
//! - Request pipelining, the decoder resets itself after every message
//! - Zero-copy header parsing
//! - Clean error handling
//!
//! # Example
//!
//! ```
//! use bytes::{Bytes, BytesMut};
//! use http::StatusCode;
//! use http1_wire::codec::{RequestDecoder, ResponseEncoder};
//! use http1_wire::protocol::{Frame, MessageHead, PayloadItem, PayloadSize, Version};
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! // bytes in: a request appears on the read side
//! let mut read_buffer = BytesMut::from("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! let mut decoder = RequestDecoder::new();
//!
//! let request = match decoder.decode(&mut read_buffer).unwrap() {
//!     Some(Frame::Head(head)) => head,
//!     other => panic!("expected a head frame, got {other:?}"),
//! };
//! assert_eq!(request.uri().path(), "/");
//! assert!(!request.is_chunked());
//!
//! // every message closes with an end-of-message marker
//! assert!(matches!(
//!     decoder.decode(&mut read_buffer).unwrap(),
//!     Some(Frame::Payload(PayloadItem::Eof))
//! ));
//!
//! // bytes out: answer with a fixed-size body
//! let mut response = MessageHead::new(Version::HTTP_11, StatusCode::OK);
//! response.set_content("Hello World!");
//! let framing = PayloadSize::for_head(&response);
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut write_buffer = BytesMut::new();
//! encoder
//!     .encode(Frame::<_, Bytes>::Head((response, framing)), &mut write_buffer)
//!     .unwrap();
//! encoder
//!     .encode(Frame::Payload(PayloadItem::<Bytes>::Eof), &mut write_buffer)
//!     .unwrap();
//!
//! assert_eq!(
//!     &write_buffer[..],
//!     &b"HTTP/1.1 200 OK\r\ncontent-length: 12\r\n\r\nHello World!"[..]
//! );
//! ```
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - [`protocol`]: the message model and frame vocabulary
//! - [`codec`]: encoding and decoding between frames and raw bytes
//!
//! ## The chunked duality
//!
//! A head's chunked state has two sources that are deliberately asymmetric.
//! The `Transfer-Encoding` header is the wire-authoritative one: while its
//! final coding is `chunked`, [`protocol::MessageHead::is_chunked`] reports
//! `true` and cannot be talked out of it by clearing the local flag. The flag
//! covers the other direction, chunk-sequence delivery without the header,
//! which the decoder uses for fixed-size bodies too large to buffer inline.
//! Chunked heads carry no inline content; the stored buffer is masked on
//! every read and reset eagerly when the flag is raised.
//!
//! ## Error Handling
//!
//! Errors implement `std::error::Error` and split by direction:
//!
//! - [`protocol::ParseError`]: decoding incoming messages
//! - [`protocol::SendError`]: encoding outgoing messages
//! - [`protocol::HttpError`]: union of the two, for callers driving both
//!
//! # Limitations
//!
//! - HTTP/1.x only (no HTTP/2 or HTTP/3 framing)
//! - Maximum header section size: 8KB
//! - Maximum number of headers: 64
//! - Trailer fields after a chunked body are consumed and dropped
//!
//! # Safety
//!
//! Unsafe code appears in one place, the zero-copy header value construction
//! in the request head decoder, relying on `httparse` having validated the
//! bytes first.

pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
