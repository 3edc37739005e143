//! Protocol model: message heads, framing vocabulary and the error taxonomy.
//!
//! A message is represented by its [`MessageHead`], generic over the subject
//! line so [`RequestHead`] and [`ResponseHead`] share one implementation of
//! the framing state: version, headers, inline content and the chunked flag.
//! Bodies that do not travel inline are delivered as a stream of
//! [`PayloadItem`]s between two head frames.

mod error;
mod frame;
mod message;
mod request;
mod response;
mod version;

pub use error::{HttpError, ParseError, SendError};
pub use frame::{Frame, PayloadItem, PayloadSize};
pub use message::MessageHead;
pub use request::{RequestHead, RequestLine};
pub use response::ResponseHead;
pub use version::Version;

pub(crate) use message::declares_chunked;
