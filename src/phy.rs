//! PHY configuration.
//!
//! Setters write only the field they own and leave the rest of the register as
//! read, except where the register holds nothing else (CSMA_BE, IRQ_MASK,
//! PHY_TX_PWR).

use embedded_hal::delay::DelayNs;

use crate::device::Device;
use crate::error::Error;
use crate::registers::{
    CSMA_BE_MAX_MASK, CSMA_BE_MAX_SHIFT, CSMA_BE_MIN_MASK, CcaMode, IrqStatus,
    PHY_CC_CCA_CCA_MODE_MASK, PHY_CC_CCA_CCA_MODE_SHIFT, PHY_CC_CCA_CHANNEL_MASK, Register,
    TRX_CTRL1_IRQ_MASK_MODE, TRX_CTRL1_TX_AUTO_CRC_ON, TRX_CTRL2_RX_SAFE_MODE,
    XAH_CTRL0_MAX_CSMA_RETRIES_MASK, XAH_CTRL0_MAX_CSMA_RETRIES_SHIFT, XAH_CTRL1_AACK_PROM_MODE,
};
use crate::transport::Transport;

fn flag(set: bool, bit: u8) -> u8 {
    if set { bit } else { 0 }
}

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Selects the channel. Only the low five bits of `channel` are used.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), Error<T::Error>> {
        self.update_register(Register::PhyCcCca, PHY_CC_CCA_CHANNEL_MASK, channel)
    }

    /// Reads back the channel.
    pub fn get_channel(&mut self) -> Result<u8, Error<T::Error>> {
        Ok(self.read_register(Register::PhyCcCca)? & PHY_CC_CCA_CHANNEL_MASK)
    }

    /// Sets the clear channel assessment mode.
    pub fn set_cca_mode(&mut self, mode: CcaMode) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::PhyCcCca,
            PHY_CC_CCA_CCA_MODE_MASK,
            mode.bits() << PHY_CC_CCA_CCA_MODE_SHIFT,
        )
    }

    /// Reads back the clear channel assessment mode.
    pub fn cca_mode(&mut self) -> Result<CcaMode, Error<T::Error>> {
        let cca = self.read_register(Register::PhyCcCca)?;
        Ok(CcaMode::from(
            (cca & PHY_CC_CCA_CCA_MODE_MASK) >> PHY_CC_CCA_CCA_MODE_SHIFT,
        ))
    }

    /// Sets the CSMA-CA backoff exponent range.
    pub fn set_csma_be(&mut self, min: u8, max: u8) -> Result<(), Error<T::Error>> {
        self.write_register(
            Register::CsmaBe,
            ((max << CSMA_BE_MAX_SHIFT) & CSMA_BE_MAX_MASK) | (min & CSMA_BE_MIN_MASK),
        )
    }

    /// Sets how many backoffs CSMA-CA may take before reporting a channel access
    /// failure.
    pub fn set_max_csma_backoffs(&mut self, backoffs: u8) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::XahCtrl0,
            XAH_CTRL0_MAX_CSMA_RETRIES_MASK,
            backoffs << XAH_CTRL0_MAX_CSMA_RETRIES_SHIFT,
        )
    }

    /// Enables or disables promiscuous reception.
    pub fn set_promiscuous(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::XahCtrl1,
            XAH_CTRL1_AACK_PROM_MODE,
            flag(enabled, XAH_CTRL1_AACK_PROM_MODE),
        )
    }

    /// Enables or disables FCS generation by the chip.
    ///
    /// While disabled, [`start_tx`](Self::start_tx) appends an FCS computed in
    /// software.
    pub fn set_auto_crc(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::TrxCtrl1,
            TRX_CTRL1_TX_AUTO_CRC_ON,
            flag(enabled, TRX_CTRL1_TX_AUTO_CRC_ON),
        )?;
        self.auto_crc = enabled;
        Ok(())
    }

    /// Makes IRQ_STATUS report masked sources too.
    pub fn set_irq_mask_mode(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::TrxCtrl1,
            TRX_CTRL1_IRQ_MASK_MODE,
            flag(enabled, TRX_CTRL1_IRQ_MASK_MODE),
        )
    }

    /// Enables dynamic frame buffer protection (RX_SAFE_MODE).
    pub fn set_frame_buffer_protection(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.update_register(
            Register::TrxCtrl2,
            TRX_CTRL2_RX_SAFE_MODE,
            flag(enabled, TRX_CTRL2_RX_SAFE_MODE),
        )
    }

    /// Selects which sources drive the IRQ line.
    pub fn set_irq_mask(&mut self, mask: IrqStatus) -> Result<(), Error<T::Error>> {
        self.write_register(Register::IrqMask, mask.bits())
    }

    /// Reads back the IRQ mask.
    pub fn irq_mask(&mut self) -> Result<IrqStatus, Error<T::Error>> {
        self.read_register(Register::IrqMask)
            .map(IrqStatus::from_bits_retain)
    }

    /// Writes PHY_TX_PWR.
    ///
    /// The encoding depends on the band and modulation; see the datasheet's
    /// recommended power tables.
    pub fn set_tx_power(&mut self, raw: u8) -> Result<(), Error<T::Error>> {
        self.write_register(Register::PhyTxPwr, raw)
    }

    /// Reads PHY_TX_PWR.
    pub fn tx_power(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::PhyTxPwr)
    }

    /// Reads and clears IRQ_STATUS.
    pub fn irq_status(&mut self) -> Result<IrqStatus, Error<T::Error>> {
        self.read_register(Register::IrqStatus)
            .map(IrqStatus::from_bits_retain)
    }

    /// Level of the IRQ line.
    ///
    /// With the default active high polarity `true` means an enabled source is
    /// pending in IRQ_STATUS.
    pub fn irq_pending(&mut self) -> Result<bool, Error<T::Error>> {
        self.transport.get_irq().map_err(Error::Driver)
    }
}
