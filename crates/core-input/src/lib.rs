//! Raw terminal input decoding.
//!
//! The terminal collaborator hands over one byte at a time through
//! [`ByteSource`]; each read is independent and may time out without that
//! being an error. [`Decoder`] folds those bytes into logical [`Key`]s,
//! recognising the VT100/xterm escape sequences for arrows, Home/End, Delete
//! and paging. Incomplete or unknown sequences never fail: they resolve to a
//! bare `Key::Escape`.

mod decoder;

pub use decoder::Decoder;

use core_events::Key;
use thiserror::Error;

/// Outcome of a single non-blocking byte read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    Byte(u8),
    /// No byte arrived within the collaborator's short timeout.
    Timeout,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("terminal read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("terminal input closed")]
    Closed,
}

/// One raw byte at a time, with a short timeout.
pub trait ByteSource {
    fn read_byte(&mut self) -> Result<ReadStatus, InputError>;
}

/// Producer of logical keys. `Ok(None)` means nothing was typed in time so
/// the caller can redraw or expire status messages before asking again.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Option<Key>, InputError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Result<ReadStatus, InputError> {
        (**self).read_byte()
    }
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn next_key(&mut self) -> Result<Option<Key>, InputError> {
        (**self).next_key()
    }
}
