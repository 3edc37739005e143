use http::StatusCode;

use crate::protocol::MessageHead;

/// Head of a response message, with the status code as its subject.
pub type ResponseHead = MessageHead<StatusCode>;

impl ResponseHead {
    pub fn status(&self) -> StatusCode {
        *self.subject()
    }

    pub fn set_status(&mut self, status: StatusCode) {
        *self.subject_mut() = status;
    }
}
