use core::fmt;

/// Errors returned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The I2C write failed, e.g. the controller did not acknowledge.
    ///
    /// Bytes written before the failure are not rolled back.
    Transport(E),
    /// A pixel coordinate lies outside the framebuffer.
    OutOfRange { x: u16, y: u16 },
    /// The operation is not valid in the active addressing mode, or the mode is
    /// not known yet because `initialize()` has not run.
    InvalidMode,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "I2C transport error: {:?}", e),
            Error::OutOfRange { x, y } => write!(f, "pixel ({}, {}) is out of range", x, y),
            Error::InvalidMode => f.write_str("operation not valid in current addressing mode"),
        }
    }
}
