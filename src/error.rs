//! Errors reported by the AT86RF212 driver.

use thiserror::Error;

use crate::transport::Capabilities;

/// Errors that can occur while driving the transceiver.
///
/// `E` is the error type of the [`Transport`](crate::transport::Transport) in use.
///
/// The variants separate wiring problems (`InvalidDriver`), bus failures (`Driver`),
/// hardware or firmware mismatches (`Comms`, `Supply`, `Length`) and timing problems
/// (`RetriesExceeded`, `Pll`), so callers can tell them apart without inspecting the bus.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The transport does not provide capabilities the configuration requires.
    #[error("transport is missing required capabilities: {0:?}")]
    InvalidDriver(Capabilities),
    /// The underlying transport call failed.
    #[error("transport error: {0:?}")]
    Driver(E),
    /// PART_NUM did not identify an AT86RF212.
    #[error("unexpected part number {0}")]
    Comms(u8),
    /// A frame length exceeded what the chip or the caller's buffer can hold.
    #[error("frame length {0} out of range")]
    Length(usize),
    /// TRX_STATUS still reported a transition in progress after this many polls.
    #[error("state transition did not settle after {0} polls")]
    RetriesExceeded(u32),
    /// The PLL did not report lock within the configured number of polls.
    #[error("PLL did not lock")]
    Pll,
    /// The digital supply regulator did not report a good voltage.
    #[error("supply voltage not ok")]
    Supply,
}

#[cfg(feature = "defmt-0-3")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidDriver(missing) => {
                defmt::write!(fmt, "InvalidDriver({=u8:08b})", missing.bits())
            }
            Self::Driver(e) => defmt::write!(fmt, "Driver({})", e),
            Self::Comms(part) => defmt::write!(fmt, "Comms({=u8:#04x})", part),
            Self::Length(len) => defmt::write!(fmt, "Length({})", len),
            Self::RetriesExceeded(polls) => defmt::write!(fmt, "RetriesExceeded({})", polls),
            Self::Pll => defmt::write!(fmt, "Pll"),
            Self::Supply => defmt::write!(fmt, "Supply"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure() {
        let err: Error<()> = Error::Comms(0x0b);
        assert_eq!(err.to_string(), "unexpected part number 11");

        let err: Error<()> = Error::RetriesExceeded(1000);
        assert_eq!(
            err.to_string(),
            "state transition did not settle after 1000 polls"
        );
    }

    #[test]
    fn test_transport_error_is_wrapped() {
        let err: Error<&str> = Error::Driver("nack");
        assert_eq!(err.to_string(), "transport error: \"nack\"");
    }
}
