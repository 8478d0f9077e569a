//! Receive path.

use embedded_hal::delay::DelayNs;
use nb::block;

use crate::consts::{FRAME_BUFFER_LEN, LEN_FIELD_LEN, MAX_FRAME_LEN, RX_TRAILER_LEN};
use crate::device::Device;
use crate::error::Error;
use crate::registers::{IrqStatus, TrxCmd};
use crate::transport::Transport;

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Brings the PLL up and starts listening.
    ///
    /// Uses the same TRX_OFF, clear, PLL_ON, lock sequence as
    /// [`start_tx`](Self::start_tx), then requests RX_ON.
    pub fn start_rx(&mut self) -> Result<(), Error<T::Error>> {
        self.enter_pll_on()?;
        let _ = self.set_state_blocking(TrxCmd::RxOn)?;
        Ok(())
    }

    /// Checks whether a frame has been received completely.
    ///
    /// Reading IRQ_STATUS clears it, so a reported frame is only seen once.
    pub fn check_rx(&mut self) -> nb::Result<(), Error<T::Error>> {
        if self.irq_status()?.contains(IrqStatus::TRX_END) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Copies the received frame into `buf`.
    ///
    /// # Arguments
    /// - `buf`: receives the PSDU (FCS included) followed by LQI, ED and RX_STATUS.
    ///   [`RxFrame::parse`](crate::frame::RxFrame::parse) splits them apart.
    ///
    /// # Returns
    /// The number of bytes written to `buf`.
    ///
    /// # Notes
    /// A PHR above the maximum frame length is rejected with [`Error::Length`]
    /// before the body is read, as is a `buf` too small for the frame.
    pub fn get_rx(&mut self, buf: &mut [u8]) -> Result<usize, Error<T::Error>> {
        let mut phr = [0u8; LEN_FIELD_LEN];
        self.read_frame(&mut phr)?;

        let psdu_len = phr[0];
        if psdu_len > MAX_FRAME_LEN {
            warn!("invalid PHR {}", psdu_len);
            return Err(Error::Length(usize::from(psdu_len)));
        }

        let copy_len = usize::from(psdu_len) + RX_TRAILER_LEN;
        if buf.len() < copy_len {
            warn!("{} byte frame does not fit in {} bytes", copy_len, buf.len());
            return Err(Error::Length(copy_len));
        }

        let mut raw = [0u8; FRAME_BUFFER_LEN];
        let read_len = LEN_FIELD_LEN + copy_len;
        self.read_frame(&mut raw[..read_len])?;
        buf[..copy_len].copy_from_slice(&raw[LEN_FIELD_LEN..read_len]);
        debug!("received {} byte PSDU", psdu_len);
        Ok(copy_len)
    }

    /// Listens until a frame arrives and copies it into `buf`.
    ///
    /// See [`get_rx`](Self::get_rx) for the layout of `buf`.
    pub fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Error<T::Error>> {
        self.start_rx()?;
        block!(self.check_rx())?;
        self.get_rx(buf)
    }
}
