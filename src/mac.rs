//! Address filter and transaction status.
//!
//! Just enough for a MAC layer sitting on top: the hardware address filter used
//! in RX_AACK mode and the outcome of the last extended mode transaction. Frame
//! retries and acknowledgements are left to the chip.

use embedded_hal::delay::DelayNs;

use crate::device::Device;
use crate::error::Error;
use crate::registers::{Register, TracStatus};
use crate::transport::Transport;

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Sets the 16 bit short address.
    pub fn set_short_address(&mut self, address: u16) -> Result<(), Error<T::Error>> {
        let [lo, hi] = address.to_le_bytes();
        self.write_register(Register::ShortAddr0, lo)?;
        self.write_register(Register::ShortAddr1, hi)
    }

    /// Sets the 16 bit PAN identifier.
    pub fn set_pan_id(&mut self, pan_id: u16) -> Result<(), Error<T::Error>> {
        let [lo, hi] = pan_id.to_le_bytes();
        self.write_register(Register::PanId0, lo)?;
        self.write_register(Register::PanId1, hi)
    }

    /// Sets the 64 bit extended address, least significant byte first.
    pub fn set_ieee_address(&mut self, address: [u8; 8]) -> Result<(), Error<T::Error>> {
        for (reg, byte) in Register::IEEE_ADDR.into_iter().zip(address) {
            self.write_register(reg, byte)?;
        }
        Ok(())
    }

    /// Reads TRAC_STATUS from TRX_STATE.
    pub fn trac_status(&mut self) -> Result<TracStatus, Error<T::Error>> {
        self.read_register(Register::TrxState).map(TracStatus::from)
    }
}
