//! Transmit path.

use embedded_hal::delay::DelayNs;
use nb::block;

use crate::device::Device;
use crate::error::Error;
use crate::frame::assemble_tx;
use crate::registers::{IrqStatus, TrxCmd};
use crate::transport::Transport;

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Loads `payload` into the frame buffer and starts sending it.
    ///
    /// The chip is forced to TRX_OFF, pending interrupts are cleared, and the PLL is
    /// brought up and must report lock before the frame is written and TX_START is
    /// issued. Two FCS bytes are appended to `payload`: zeros for the chip to fill
    /// in, or a software FCS when auto CRC is off.
    ///
    /// # Arguments
    /// - `payload`: MAC header and payload, at most 125 bytes.
    ///
    /// # Notes
    /// An oversized payload is rejected with [`Error::Length`] before any bus access.
    /// Completion is reported by [`check_tx`](Self::check_tx).
    pub fn start_tx(&mut self, payload: &[u8]) -> Result<(), Error<T::Error>> {
        let frame = assemble_tx(payload, !self.auto_crc).map_err(|len| {
            warn!("PSDU of {} bytes does not fit", len);
            Error::Length(len)
        })?;

        self.enter_pll_on()?;
        self.write_frame(&frame)?;
        debug!("sending {} byte PSDU", frame[0]);
        self.set_state(TrxCmd::TxStart)
    }

    /// Checks whether the transmission started by [`start_tx`](Self::start_tx)
    /// has ended.
    ///
    /// Reading IRQ_STATUS clears it, so a reported completion is only seen once.
    pub fn check_tx(&mut self) -> nb::Result<(), Error<T::Error>> {
        if self.irq_status()?.contains(IrqStatus::TRX_END) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Sends `payload` and busy waits until the transmission has ended.
    pub fn transmit(&mut self, payload: &[u8]) -> Result<(), Error<T::Error>> {
        self.start_tx(payload)?;
        block!(self.check_tx())
    }
}
