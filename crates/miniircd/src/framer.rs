//! Per-connection byte buffer that reassembles CRLF-delimited lines out of
//! an arbitrarily chunked byte stream. Owned exclusively by one connection's
//! read task — no locking needed.

use crate::constants::BUFFER_SIZE;

#[derive(Debug, Default)]
pub struct LineFramer {
    inbuf: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append freshly-read bytes and return every complete line now
    /// available, in order. Lines are UTF-8 lossily decoded; a line that
    /// decodes to nothing printable is still returned (possibly empty,
    /// and callers silently ignore empty lines per §4.1).
    ///
    /// Feeding more than [`BUFFER_SIZE`] bytes in one call is the caller's
    /// responsibility to avoid — the framer itself does not truncate or cap
    /// line length, matching the spec's "no truncation required" allowance.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.inbuf.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = find_crlf(&self.inbuf) {
            let line = self.inbuf.drain(..pos).collect::<Vec<u8>>();
            self.inbuf.drain(..2); // discard the CRLF itself
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Reads at most [`BUFFER_SIZE`] bytes worth of socket I/O per call is the
/// contract connection tasks honor; this constant documents that contract
/// alongside the framer that depends on it.
pub const READ_CHUNK: usize = BUFFER_SIZE;
