use bytes::Bytes;
use http::header::TRANSFER_ENCODING;
use http::{HeaderMap, HeaderValue};

use crate::protocol::Version;

/// The distinguished empty content buffer. `Bytes::new` owns no allocation, so
/// every masked or defaulted read hands out the same zero-length view.
static EMPTY_CONTENT: Bytes = Bytes::new();

/// Framing-level state of a single HTTP/1.x message, generic over the subject
/// line: a request line for requests, a status code for responses.
///
/// Besides version, headers and subject, a head tracks how its body travels,
/// and that state is deliberately two-sided:
///
/// * The `Transfer-Encoding` header is the wire-authoritative signal. While its
///   final transfer coding is `chunked`, [`is_chunked`] reports `true` no
///   matter what the local flag says. A body framed as a chunk sequence cannot
///   be reinterpreted as a fixed-size one by flipping a flag.
/// * The local flag covers the opposite direction. A decoder or encoder can
///   request chunk-sequence delivery without the header being present, for
///   example for a fixed-length body too large to buffer inline.
///
/// Chunked messages carry no inline content. [`set_chunked(true)`] resets the
/// stored buffer at once, and every content read re-derives the observed state
/// first, so later header edits can never expose a stale buffer.
///
/// [`is_chunked`]: MessageHead::is_chunked
/// [`set_chunked(true)`]: MessageHead::set_chunked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageHead<S> {
    version: Version,
    subject: S,
    headers: HeaderMap,
    content: Bytes,
    chunked: bool,
}

impl<S> MessageHead<S> {
    /// Creates a head with empty headers, empty content and the chunked flag
    /// off.
    pub fn new(version: Version, subject: S) -> Self {
        Self {
            version,
            subject,
            headers: HeaderMap::new(),
            content: Bytes::new(),
            chunked: false,
        }
    }

    /// Protocol version of this message.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Replaces the protocol version. [`Version`] values are well-formed by
    /// construction, so nothing is validated here; malformed text fails at the
    /// parse boundary instead.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Subject of this head, the request line or the status code.
    pub fn subject(&self) -> &S {
        &self.subject
    }

    pub fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    /// Headers of this message.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers. Header edits feed straight into the
    /// observed chunked state: inserting `Transfer-Encoding: chunked` here
    /// makes [`is_chunked`](Self::is_chunked) report `true` on its next call.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Inline content of this message, never a missing value: bodiless
    /// messages read as the empty buffer.
    ///
    /// While the observed chunked state is `true` the stored buffer is masked
    /// and this returns the empty buffer, regardless of what was stored before
    /// or after the state changed.
    pub fn content(&self) -> &Bytes {
        if self.is_chunked() {
            &EMPTY_CONTENT
        } else {
            &self.content
        }
    }

    /// Takes the inline content out, leaving the empty buffer behind. Masked
    /// the same way as [`content`](Self::content): while the observed state is
    /// chunked this returns the empty buffer and leaves the stored one alone.
    pub fn take_content(&mut self) -> Bytes {
        if self.is_chunked() {
            Bytes::new()
        } else {
            std::mem::take(&mut self.content)
        }
    }

    /// Sets the inline content. The buffer is stored unconditionally and no
    /// flag or header changes with it; while the observed chunked state is
    /// `true`, reads keep returning the empty buffer.
    pub fn set_content(&mut self, content: impl Into<Bytes>) {
        self.content = content.into();
    }

    /// Observed chunked state, re-derived on every call: the local flag, or a
    /// `Transfer-Encoding` header whose final coding is `chunked`. The header
    /// can only force the result toward `true`, never toward `false`.
    pub fn is_chunked(&self) -> bool {
        self.chunked || declares_chunked(&self.headers)
    }

    /// Sets the local chunked flag.
    ///
    /// `true` also resets the stored content to the empty buffer at once.
    /// `false` clears only the flag. While the headers still declare chunked,
    /// [`is_chunked`](Self::is_chunked) keeps returning `true`.
    pub fn set_chunked(&mut self, chunked: bool) {
        self.chunked = chunked;
        if chunked {
            self.content = Bytes::new();
        }
    }
}

/// Whether the headers declare a chunk-framed body: the final comma-separated
/// token of any `Transfer-Encoding` value equals `chunked`, ASCII
/// case-insensitively. Only the final token counts, since chunked frames the
/// body only when it is the last coding applied.
pub(crate) fn declares_chunked(headers: &HeaderMap) -> bool {
    headers.get_all(TRANSFER_ENCODING).iter().any(is_chunked_value)
}

fn is_chunked_value(value: &HeaderValue) -> bool {
    match value.as_bytes().rsplit(|b| *b == b',').next() {
        Some(token) => token.trim_ascii().eq_ignore_ascii_case(b"chunked"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn head() -> MessageHead<()> {
        MessageHead::new(Version::HTTP_11, ())
    }

    fn insert_te(head: &mut MessageHead<()>, value: &'static str) {
        head.headers_mut()
            .insert(TRANSFER_ENCODING, HeaderValue::from_static(value));
    }

    #[test]
    fn content_defaults_to_empty_and_round_trips() {
        let mut head = head();
        assert!(head.content().is_empty());

        head.set_content("hello");
        assert!(!head.is_chunked());
        assert_eq!(head.content(), "hello");
    }

    #[test]
    fn take_content_leaves_empty_behind() {
        let mut head = head();
        head.set_content("hello");

        assert_eq!(head.take_content(), "hello");
        assert!(head.content().is_empty());
        assert_eq!(head.take_content(), "");
    }

    #[test]
    fn header_masks_content_until_removed() {
        let mut head = head();
        insert_te(&mut head, "chunked");
        head.set_content("hello");

        assert!(head.is_chunked());
        assert!(head.content().is_empty());
        assert_eq!(head.take_content(), "");

        // the stored buffer was masked, not erased
        head.headers_mut().remove(TRANSFER_ENCODING);
        assert!(!head.is_chunked());
        assert_eq!(head.content(), "hello");
    }

    #[test]
    fn header_wins_over_cleared_flag_in_any_casing() {
        for value in ["chunked", "Chunked", "CHUNKED", "ChUnKeD"] {
            let mut head = head();
            head.headers_mut().insert(
                TRANSFER_ENCODING,
                HeaderValue::from_str(value).unwrap(),
            );

            head.set_chunked(false);
            assert!(head.is_chunked(), "{value:?} should keep the state chunked");
        }
    }

    #[test]
    fn flag_outlives_header_removal() {
        let mut head = head();
        head.set_chunked(true);
        insert_te(&mut head, "chunked");

        head.headers_mut().remove(TRANSFER_ENCODING);
        assert!(head.is_chunked());

        head.set_chunked(false);
        assert!(!head.is_chunked());
    }

    #[test]
    fn flag_tracks_last_set_without_header() {
        let mut head = head();
        head.set_chunked(true);
        assert!(head.is_chunked());

        head.set_chunked(false);
        assert!(!head.is_chunked());
    }

    #[test]
    fn set_chunked_true_erases_content_eagerly() {
        let mut head = head();
        head.set_content("hello");
        head.set_chunked(true);
        assert!(head.content().is_empty());

        // erased at set time, so clearing the flag reveals nothing
        head.set_chunked(false);
        assert!(head.content().is_empty());
    }

    #[test]
    fn content_set_while_chunked_is_masked_not_dropped() {
        let mut head = head();
        head.set_chunked(true);
        head.set_content("hello");
        assert!(head.content().is_empty());

        head.set_chunked(false);
        assert_eq!(head.content(), "hello");
    }

    #[test]
    fn set_chunked_is_idempotent() {
        let mut once = head();
        once.set_content("hello");
        once.set_chunked(true);

        let mut twice = head();
        twice.set_content("hello");
        twice.set_chunked(true);
        twice.set_chunked(true);

        assert_eq!(once, twice);
        assert!(twice.is_chunked());
    }

    #[test]
    fn version_round_trips() {
        let mut head = head();
        assert_eq!(head.version(), Version::HTTP_11);

        for version in [Version::HTTP_09, Version::HTTP_10, Version::new(2, 0)] {
            head.set_version(version);
            assert_eq!(head.version(), version);
        }
    }

    #[test]
    fn only_the_final_coding_counts() {
        let mut head = head();
        insert_te(&mut head, "gzip, chunked");
        assert!(head.is_chunked());

        insert_te(&mut head, "chunked, gzip");
        assert!(!head.is_chunked());

        insert_te(&mut head, " chunked ");
        assert!(head.is_chunked());

        insert_te(&mut head, "gzip");
        assert!(!head.is_chunked());
    }

    #[test]
    fn any_transfer_encoding_line_can_declare_chunked() {
        let mut head = head();
        head.headers_mut()
            .append(TRANSFER_ENCODING, HeaderValue::from_static("gzip"));
        head.headers_mut()
            .append(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        assert!(head.is_chunked());
    }
}
