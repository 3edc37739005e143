use std::io;

use bytes::BytesMut;

/// Returns early with the given error when the predicate does not hold.
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// `io::Write` adapter over the output buffer, for `write!` calls that format
/// status lines and chunk sizes straight into it.
pub(crate) struct DstWriter<'a>(pub(crate) &'a mut BytesMut);

impl io::Write for DstWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
