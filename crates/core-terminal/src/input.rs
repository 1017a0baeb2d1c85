//! Stdin byte source.
//!
//! A dedicated thread blocks on stdin and forwards bytes through a channel;
//! `read_byte` waits at most `timeout` for the next one. The editing core
//! stays single threaded: the thread only provides the timed read that
//! escape sequence decoding and idle status expiry depend on.

use core_input::{ByteSource, InputError, ReadStatus};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

/// Default wait for the next byte.
pub const READ_TIMEOUT: Duration = Duration::from_millis(100);

pub struct StdinBytes {
    rx: Receiver<io::Result<u8>>,
    timeout: Duration,
}

impl StdinBytes {
    /// Spawn the stdin reader thread.
    pub fn spawn(timeout: Duration) -> io::Result<Self> {
        let (tx, rx) = crossbeam_channel::unbounded();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let mut stdin = io::stdin().lock();
                let mut buf = [0u8; 256];
                loop {
                    match stdin.read(&mut buf) {
                        Ok(0) => {
                            tracing::debug!(target: "input", "stdin_eof");
                            break;
                        }
                        Ok(n) => {
                            for b in &buf[..n] {
                                if tx.send(Ok(*b)).is_err() {
                                    return;
                                }
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            tracing::warn!(target: "input", error = %e, "stdin_read_error");
                            let _ = tx.send(Err(e));
                            break;
                        }
                    }
                }
            })?;
        Ok(Self::from_receiver(rx, timeout))
    }

    /// Byte source over an existing channel.
    pub fn from_receiver(rx: Receiver<io::Result<u8>>, timeout: Duration) -> Self {
        Self { rx, timeout }
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> Result<ReadStatus, InputError> {
        match self.rx.recv_timeout(self.timeout) {
            Ok(Ok(b)) => Ok(ReadStatus::Byte(b)),
            Ok(Err(e)) => Err(InputError::Read(e)),
            Err(RecvTimeoutError::Timeout) => Ok(ReadStatus::Timeout),
            Err(RecvTimeoutError::Disconnected) => Err(InputError::Closed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{Direction, Key};
    use core_input::{Decoder, KeySource};

    #[test]
    fn bytes_then_timeout_then_closed() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut src = StdinBytes::from_receiver(rx, Duration::from_millis(5));
        tx.send(Ok(b'a')).unwrap();
        assert!(matches!(src.read_byte(), Ok(ReadStatus::Byte(b'a'))));
        assert!(matches!(src.read_byte(), Ok(ReadStatus::Timeout)));
        drop(tx);
        assert!(matches!(src.read_byte(), Err(InputError::Closed)));
    }

    #[test]
    fn read_errors_propagate() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut src = StdinBytes::from_receiver(rx, Duration::from_millis(5));
        tx.send(Err(io::Error::other("boom"))).unwrap();
        assert!(matches!(src.read_byte(), Err(InputError::Read(_))));
    }

    #[test]
    fn lone_escape_resolves_after_timeout() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let src = StdinBytes::from_receiver(rx, Duration::from_millis(5));
        let mut dec = Decoder::new(src);
        tx.send(Ok(0x1b)).unwrap();
        assert_eq!(dec.next_key().unwrap(), Some(Key::Escape));
    }

    #[test]
    fn arrow_sequence_decodes_through_channel() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut dec = Decoder::new(StdinBytes::from_receiver(rx, Duration::from_millis(5)));
        for b in b"\x1b[A" {
            tx.send(Ok(*b)).unwrap();
        }
        assert_eq!(dec.next_key().unwrap(), Some(Key::Arrow(Direction::Up)));
        assert_eq!(dec.next_key().unwrap(), None);
    }
}
