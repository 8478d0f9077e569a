//! Frame layout in the transceiver's frame buffer.
//!
//! On transmit the frame buffer holds `[PHR, PSDU..., FCS_lo, FCS_hi]`, where the
//! PHR counts the PSDU including its two FCS bytes. On receive a frame buffer read
//! returns `[PHR, PSDU..., LQI, ED, RX_STATUS]`.
//!
//! [`RxFrame`] interprets what [`Device::get_rx`](crate::Device::get_rx) copied out:
//! the PSDU followed by the three trailer bytes.

use heapless::Vec;
use libm::roundf;

use crate::consts::{CRC_LEN, LEN_FIELD_LEN, MAX_FRAME_LEN_USIZE, RX_TRAILER_LEN};
use crate::crc::{fcs, fcs_ok};
use crate::registers::RX_STATUS_CRC_VALID;

/// Capacity of an assembled outbound frame: PHR plus the largest PSDU.
pub(crate) const TX_FRAME_CAPACITY: usize = LEN_FIELD_LEN + MAX_FRAME_LEN_USIZE;

/// Builds the frame buffer image for `payload`.
///
/// With `software_fcs` the FCS is computed here; otherwise two zero bytes hold its
/// place for the hardware to overwrite. Returns the PSDU length that was rejected
/// if the payload plus FCS does not fit.
pub(crate) fn assemble_tx(
    payload: &[u8],
    software_fcs: bool,
) -> Result<Vec<u8, TX_FRAME_CAPACITY>, usize> {
    let psdu_len = payload.len() + CRC_LEN;
    if psdu_len > MAX_FRAME_LEN_USIZE {
        return Err(psdu_len);
    }

    let trailer = if software_fcs { fcs(payload) } else { [0; CRC_LEN] };

    let mut frame = Vec::new();
    frame.push(psdu_len as u8).map_err(|_| psdu_len)?;
    frame.extend_from_slice(payload).map_err(|_| psdu_len)?;
    frame.extend_from_slice(&trailer).map_err(|_| psdu_len)?;
    Ok(frame)
}

/// A received frame as copied out of the frame buffer.
///
/// ## Layout
///
/// `[PSDU..., LQI, ED, RX_STATUS]`, where the PSDU ends with the two FCS bytes.
///
/// ## Example
///
/// ```rust
/// use at86rf212::frame::RxFrame;
///
/// let raw = [0x41, 0x88, 0x12, 0x34, 0xff, 0x20, 0x80];
/// let frame = RxFrame::parse(&raw).unwrap();
/// assert_eq!(frame.payload(), &[0x41, 0x88]);
/// assert_eq!(frame.lqi(), 0xff);
/// assert!(frame.crc_valid());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RxFrame<'a> {
    psdu: &'a [u8],
    lqi: u8,
    ed: u8,
    rx_status: u8,
}

impl<'a> RxFrame<'a> {
    /// Splits `raw` into PSDU and trailer.
    ///
    /// Returns `None` if `raw` is too short to hold the trailer.
    pub fn parse(raw: &'a [u8]) -> Option<Self> {
        let split = raw.len().checked_sub(RX_TRAILER_LEN)?;
        let (psdu, trailer) = raw.split_at(split);
        Some(Self {
            psdu,
            lqi: trailer[0],
            ed: trailer[1],
            rx_status: trailer[2],
        })
    }

    /// The PSDU, including its FCS.
    pub fn psdu(&self) -> &'a [u8] {
        self.psdu
    }

    /// The PSDU without its FCS.
    pub fn payload(&self) -> &'a [u8] {
        &self.psdu[..self.psdu.len().saturating_sub(CRC_LEN)]
    }

    /// Link quality indicator.
    pub fn lqi(&self) -> u8 {
        self.lqi
    }

    /// Energy detection level measured during reception.
    pub fn ed(&self) -> u8 {
        self.ed
    }

    /// Whether the chip found the FCS valid.
    pub fn crc_valid(&self) -> bool {
        self.rx_status & RX_STATUS_CRC_VALID != 0
    }

    /// Recomputes the FCS in software.
    pub fn fcs_ok(&self) -> bool {
        fcs_ok(self.psdu)
    }

    /// Received power in dBm, from the ED level.
    ///
    /// `rssi_base_dbm` depends on the modulation in use; see the `RSSI_BASE_*`
    /// constants in [`crate::consts`].
    pub fn rssi_dbm(&self, rssi_base_dbm: i16) -> i16 {
        roundf(f32::from(rssi_base_dbm) + 1.03 * f32::from(self.ed)) as i16
    }
}
