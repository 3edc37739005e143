//! Shared scaffolding for the workspace benchmarks.

/// A raw wire sample embedded at compile time, fed to the codecs by the
/// benches under `benches/`.
#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    content: &'static str,
}

impl Fixture {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    /// Number of bytes this sample puts on the wire.
    pub fn wire_len(&self) -> u64 {
        self.content.len() as u64
    }
}
