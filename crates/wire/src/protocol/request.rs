use http::{Method, Uri};

use crate::protocol::MessageHead;

/// Subject of a request head: the method and target of the request line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestLine {
    method: Method,
    uri: Uri,
}

impl RequestLine {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self { method, uri }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

/// Head of a request message.
pub type RequestHead = MessageHead<RequestLine>;

impl RequestHead {
    pub fn method(&self) -> &Method {
        self.subject().method()
    }

    pub fn uri(&self) -> &Uri {
        self.subject().uri()
    }

    /// Whether a message with this method is allowed to carry a body. Bodies
    /// on the bodiless methods are ignored rather than rejected.
    pub fn needs_body(&self) -> bool {
        !matches!(
            self.method(),
            &Method::GET | &Method::HEAD | &Method::DELETE | &Method::OPTIONS | &Method::CONNECT
        )
    }
}
