//! Codec module for turning bytes into message frames and back.
//!
//! Both directions speak the same frame language: a head frame, zero or more
//! payload chunks and a final end-of-message marker.
//!
//! - [`RequestDecoder`] parses incoming requests. Small fixed-size bodies are
//!   delivered inline in the head's content, larger and chunk-framed ones
//!   stream as payload frames behind a head whose chunked state is set.
//! - [`ResponseEncoder`] serializes outgoing responses, reconciling the
//!   framing headers with the payload framing the head was committed to.
//!
//! Head and body handling live in their own submodules; each body framing
//! (fixed length, chunk sequence, none) is a small codec of its own, and the
//! payload types dispatch between them.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use http1_wire::codec::RequestDecoder;
//! use tokio_util::codec::Decoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let mut read_buffer = BytesMut::from("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! let frame = decoder.decode(&mut read_buffer).unwrap();
//! assert!(frame.is_some());
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
