//! Request head decoder.
//!
//! Parses the request line and header section with `httparse`, then hands the
//! header bytes over without copying them: the head section is split off the
//! read buffer as one `Bytes` block and each header value is a slice into it.
//! Alongside the head, the decoder reports how the body is framed so the
//! caller can pick the matching payload decoder.

use std::mem::MaybeUninit;

use bytes::BytesMut;
use http::{HeaderName, HeaderValue, Method, Uri};
use httparse::{Error, Status};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::ensure;
use crate::protocol::{MessageHead, ParseError, PayloadSize, RequestHead, RequestLine, Version};

/// Maximum number of headers in a request head.
pub(crate) const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes of the whole head section.
pub(crate) const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Decodes a request head and reports the framing of the body that follows.
#[derive(Debug, Default)]
pub struct HeaderDecoder;

impl Decoder for HeaderDecoder {
    type Item = (RequestHead, PayloadSize);
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // "GET / HTTP/1.1" is 14 bytes, anything shorter cannot hold a head
        if src.len() < 14 {
            return Ok(None);
        }

        let mut req = httparse::Request::new(&mut []);
        // SAFETY: an array of `MaybeUninit` needs no initialization itself
        let mut headers: [MaybeUninit<httparse::Header>; MAX_HEADER_NUM] =
            unsafe { MaybeUninit::uninit().assume_init() };

        let parsed = req
            .parse_with_uninit_headers(src, &mut headers)
            .map_err(|e| match e {
                Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
                Error::Version => {
                    ParseError::invalid_version("malformed or unsupported version token")
                }
                e => ParseError::invalid_header(e.to_string()),
            })?;

        match parsed {
            Status::Complete(head_end) => {
                ensure!(
                    head_end <= MAX_HEADER_BYTES,
                    ParseError::too_large_header(head_end, MAX_HEADER_BYTES)
                );

                let header_count = req.headers.len();
                ensure!(
                    header_count <= MAX_HEADER_NUM,
                    ParseError::too_many_headers(MAX_HEADER_NUM)
                );

                // record the byte ranges before `req`'s borrows of `src` end
                let mut header_index: [HeaderIndex; MAX_HEADER_NUM] = EMPTY_HEADER_INDEX_ARRAY;
                HeaderIndex::record(src, req.headers, &mut header_index);

                let version = match req.version {
                    Some(0) => Version::HTTP_10,
                    Some(1) => Version::HTTP_11,
                    other => {
                        return Err(ParseError::invalid_version(format!(
                            "http1 minor version {other:?} not supported"
                        )));
                    }
                };

                let method = req
                    .method
                    .ok_or(ParseError::InvalidMethod)?
                    .parse::<Method>()
                    .map_err(|_| ParseError::InvalidMethod)?;

                let uri = req
                    .path
                    .ok_or(ParseError::InvalidUri)?
                    .parse::<Uri>()
                    .map_err(|_| ParseError::InvalidUri)?;

                let mut head = MessageHead::new(version, RequestLine::new(method, uri));
                head.headers_mut().reserve(header_count);

                let header_bytes = src.split_to(head_end).freeze();
                for index in &header_index[..header_count] {
                    // httparse verified the name is a valid token
                    let name = HeaderName::from_bytes(&header_bytes[index.name.0..index.name.1])
                        .map_err(|e| ParseError::invalid_header(e.to_string()))?;

                    // SAFETY: httparse verified the value holds no byte a
                    // HeaderValue rejects, and the slice keeps the backing
                    // block alive without copying it.
                    let value = unsafe {
                        HeaderValue::from_maybe_shared_unchecked(
                            header_bytes.slice(index.value.0..index.value.1),
                        )
                    };

                    head.headers_mut().append(name, value);
                }

                let payload_size = parse_payload(&head)?;
                trace!(head_bytes = head_end, ?payload_size, "request head complete");

                Ok(Some((head, payload_size)))
            }
            Status::Partial => {
                ensure!(
                    src.len() <= MAX_HEADER_BYTES,
                    ParseError::too_large_header(src.len(), MAX_HEADER_BYTES)
                );
                Ok(None)
            }
        }
    }
}

/// Byte ranges of one header's name and value inside the head section.
///
/// Recording positions instead of borrowing lets the decoder release `src`
/// and still build values off the frozen head block, copy-free.
#[derive(Clone, Copy)]
struct HeaderIndex {
    name: (usize, usize),
    value: (usize, usize),
}

const EMPTY_HEADER_INDEX: HeaderIndex = HeaderIndex {
    name: (0, 0),
    value: (0, 0),
};

const EMPTY_HEADER_INDEX_ARRAY: [HeaderIndex; MAX_HEADER_NUM] =
    [EMPTY_HEADER_INDEX; MAX_HEADER_NUM];

impl HeaderIndex {
    fn record(bytes: &[u8], headers: &[httparse::Header<'_>], indices: &mut [HeaderIndex]) {
        let base = bytes.as_ptr() as usize;
        for (header, slot) in headers.iter().zip(indices.iter_mut()) {
            let name_start = header.name.as_ptr() as usize - base;
            slot.name = (name_start, name_start + header.name.len());
            let value_start = header.value.as_ptr() as usize - base;
            slot.value = (value_start, value_start + header.value.len());
        }
    }
}

/// Framing of the body that follows the head, per RFC 9112 section 6.
///
/// Bodiless methods never get a payload. Otherwise the observed chunked state
/// of the head picks chunk framing, a `Content-Length` picks fixed framing,
/// and carrying both headers at once is rejected.
fn parse_payload(head: &RequestHead) -> Result<PayloadSize, ParseError> {
    if !head.needs_body() {
        return Ok(PayloadSize::Empty);
    }

    let te_header = head.headers().get(http::header::TRANSFER_ENCODING);
    let cl_header = head.headers().get(http::header::CONTENT_LENGTH);

    match (te_header, cl_header) {
        (None, None) => Ok(PayloadSize::Empty),

        (Some(_), None) => {
            if head.is_chunked() {
                Ok(PayloadSize::Chunked)
            } else {
                Ok(PayloadSize::Empty)
            }
        }

        (None, Some(cl_value)) => {
            let cl_str = cl_value
                .to_str()
                .map_err(|_| ParseError::invalid_header("content-length is not visible ascii"))?;
            let length = cl_str.trim().parse::<u64>().map_err(|_| {
                ParseError::invalid_header(format!("content-length {cl_str:?} is not a u64"))
            })?;
            Ok(PayloadSize::Length(length))
        }

        (Some(_), Some(_)) => Err(ParseError::invalid_header(
            "transfer-encoding and content-length both present",
        )),
    }
}
