//! Frame output.

use std::io::{self, Write};

/// Destination for composed frames.
pub trait FrameSink {
    /// Write the whole frame and flush.
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Writes frames to the process's stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl FrameSink for StdoutSink {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(frame)?;
        out.flush()
    }
}

impl FrameSink for Vec<u8> {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.extend_from_slice(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_appends_frames() {
        let mut sink = Vec::new();
        sink.write_frame(b"one").unwrap();
        sink.write_frame(b"two").unwrap();
        assert_eq!(sink, b"onetwo");
    }
}
