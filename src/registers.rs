//! AT86RF212 register map.
//!
//! Register addresses and bit fields are reproduced from the AT86RF212 datasheet
//! register summary. Field constants are grouped by the register they belong to
//! and are always expressed as in-place masks; shift the value into position
//! before passing it to [`Device::update_register`](crate::Device::update_register).

use bitflags::bitflags;

/// Register addresses in the transceiver register space.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    TrxStatus = 0x01,
    TrxState = 0x02,
    TrxCtrl0 = 0x03,
    TrxCtrl1 = 0x04,
    PhyTxPwr = 0x05,
    PhyRssi = 0x06,
    PhyEdLevel = 0x07,
    PhyCcCca = 0x08,
    CcaThres = 0x09,
    RxCtrl = 0x0A,
    SfdValue = 0x0B,
    TrxCtrl2 = 0x0C,
    AntDiv = 0x0D,
    IrqMask = 0x0E,
    IrqStatus = 0x0F,
    VregCtrl = 0x10,
    Batmon = 0x11,
    XoscCtrl = 0x12,
    CcCtrl0 = 0x13,
    CcCtrl1 = 0x14,
    RxSyn = 0x15,
    RfCtrl0 = 0x16,
    XahCtrl1 = 0x17,
    FtnCtrl = 0x18,
    RfCtrl1 = 0x19,
    PllCf = 0x1A,
    PllDcu = 0x1B,
    PartNum = 0x1C,
    VersionNum = 0x1D,
    ManId0 = 0x1E,
    ManId1 = 0x1F,
    ShortAddr0 = 0x20,
    ShortAddr1 = 0x21,
    PanId0 = 0x22,
    PanId1 = 0x23,
    IeeeAddr0 = 0x24,
    IeeeAddr1 = 0x25,
    IeeeAddr2 = 0x26,
    IeeeAddr3 = 0x27,
    IeeeAddr4 = 0x28,
    IeeeAddr5 = 0x29,
    IeeeAddr6 = 0x2A,
    IeeeAddr7 = 0x2B,
    XahCtrl0 = 0x2C,
    CsmaSeed0 = 0x2D,
    CsmaSeed1 = 0x2E,
    CsmaBe = 0x2F,
}

impl Register {
    /// The 64 bit IEEE address registers, least significant byte first.
    pub const IEEE_ADDR: [Register; 8] = [
        Self::IeeeAddr0,
        Self::IeeeAddr1,
        Self::IeeeAddr2,
        Self::IeeeAddr3,
        Self::IeeeAddr4,
        Self::IeeeAddr5,
        Self::IeeeAddr6,
        Self::IeeeAddr7,
    ];

    /// Register address on the bus.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

// TRX_STATUS
/// TRX_STATUS: current state code.
pub const TRX_STATUS_MASK: u8 = 0x1F;
/// TRX_STATUS: CCA result, valid when `CCA_DONE` is set.
pub const TRX_STATUS_CCA_STATUS: u8 = 0x40;
/// TRX_STATUS: CCA measurement complete.
pub const TRX_STATUS_CCA_DONE: u8 = 0x80;

// TRX_STATE
/// TRX_STATE: state machine command.
pub const TRX_CMD_MASK: u8 = 0x1F;
/// TRX_STATE: TRAC status of the last extended-mode transaction.
pub const TRAC_STATUS_MASK: u8 = 0xE0;
/// TRX_STATE: TRAC status position.
pub const TRAC_STATUS_SHIFT: u8 = 5;

// TRX_CTRL_1
/// TRX_CTRL_1: IRQ polarity.
pub const TRX_CTRL1_IRQ_POLARITY: u8 = 0x01;
/// TRX_CTRL_1: report masked interrupt sources in IRQ_STATUS.
pub const TRX_CTRL1_IRQ_MASK_MODE: u8 = 0x02;
/// TRX_CTRL_1: append an FCS in hardware on transmit.
pub const TRX_CTRL1_TX_AUTO_CRC_ON: u8 = 0x20;

// TRX_CTRL_2
/// TRX_CTRL_2: frame buffer protection (RX_SAFE_MODE).
pub const TRX_CTRL2_RX_SAFE_MODE: u8 = 0x80;

// PHY_TX_PWR
/// PHY_TX_PWR: full register; the power table value is written as a whole.
pub const PHY_TX_PWR_MASK: u8 = 0xFF;

// PHY_RSSI
/// PHY_RSSI: RSSI value.
pub const PHY_RSSI_RSSI_MASK: u8 = 0x1F;
/// PHY_RSSI: FCS of the last received frame was valid.
pub const PHY_RSSI_RX_CRC_VALID: u8 = 0x80;

// PHY_CC_CCA
/// PHY_CC_CCA: channel number.
pub const PHY_CC_CCA_CHANNEL_MASK: u8 = 0x1F;
/// PHY_CC_CCA: CCA mode.
pub const PHY_CC_CCA_CCA_MODE_MASK: u8 = 0x60;
/// PHY_CC_CCA: CCA mode position.
pub const PHY_CC_CCA_CCA_MODE_SHIFT: u8 = 5;
/// PHY_CC_CCA: manual CCA request.
pub const PHY_CC_CCA_CCA_REQUEST: u8 = 0x80;

// VREG_CTRL
/// VREG_CTRL: digital supply regulator voltage ok.
pub const VREG_CTRL_DVDD_OK: u8 = 0x04;
/// VREG_CTRL: analog supply regulator voltage ok.
pub const VREG_CTRL_AVDD_OK: u8 = 0x40;

// XAH_CTRL_0
/// XAH_CTRL_0: maximum CSMA backoffs.
pub const XAH_CTRL0_MAX_CSMA_RETRIES_MASK: u8 = 0x0E;
/// XAH_CTRL_0: maximum CSMA backoffs position.
pub const XAH_CTRL0_MAX_CSMA_RETRIES_SHIFT: u8 = 1;
/// XAH_CTRL_0: maximum frame retries.
pub const XAH_CTRL0_MAX_FRAME_RETRIES_MASK: u8 = 0xF0;

// XAH_CTRL_1
/// XAH_CTRL_1: promiscuous mode.
pub const XAH_CTRL1_AACK_PROM_MODE: u8 = 0x02;

// CSMA_BE
/// CSMA_BE: minimum backoff exponent.
pub const CSMA_BE_MIN_MASK: u8 = 0x0F;
/// CSMA_BE: maximum backoff exponent.
pub const CSMA_BE_MAX_MASK: u8 = 0xF0;
/// CSMA_BE: maximum backoff exponent position.
pub const CSMA_BE_MAX_SHIFT: u8 = 4;

/// RX_STATUS (last byte of a frame buffer read): FCS valid.
pub const RX_STATUS_CRC_VALID: u8 = 0x80;

/// Commands accepted by the TRX_STATE register.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum TrxCmd {
    /// No operation.
    Nop = 0x00,
    /// Start transmitting the frame buffer contents.
    TxStart = 0x02,
    /// Abort any activity and go to TRX_OFF.
    ForceTrxOff = 0x03,
    /// Abort any activity and go to PLL_ON.
    ForcePllOn = 0x04,
    /// Listen (basic operating mode).
    RxOn = 0x06,
    /// Transceiver off, clock running.
    TrxOff = 0x08,
    /// PLL on, ready to transmit.
    PllOn = 0x09,
    /// Listen with automatic acknowledgement.
    RxAackOn = 0x16,
    /// Transmit with CSMA-CA and automatic retries.
    TxAretOn = 0x19,
}

/// State codes reported by TRX_STATUS.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TrxStatus {
    /// Power on after reset.
    POn,
    /// Receiving a frame.
    BusyRx,
    /// Transmitting a frame.
    BusyTx,
    /// Listening.
    RxOn,
    /// Transceiver off.
    TrxOff,
    /// PLL on.
    PllOn,
    /// Sleeping.
    Sleep,
    /// Receiving a frame in extended mode.
    BusyRxAack,
    /// Transmitting a frame in extended mode.
    BusyTxAret,
    /// Listening in extended mode.
    RxAackOn,
    /// Ready to transmit in extended mode.
    TxAretOn,
    /// Listening with CLKM disabled.
    RxOnNoclk,
    /// Listening in extended mode with CLKM disabled.
    RxAackOnNoclk,
    /// Receiving in extended mode with CLKM disabled.
    BusyRxAackNoclk,
    /// A state change is still in progress.
    StateTransitionInProgress,
    /// A code the datasheet does not define.
    Other(u8),
}

impl From<u8> for TrxStatus {
    fn from(value: u8) -> Self {
        match value & TRX_STATUS_MASK {
            0x00 => Self::POn,
            0x01 => Self::BusyRx,
            0x02 => Self::BusyTx,
            0x06 => Self::RxOn,
            0x08 => Self::TrxOff,
            0x09 => Self::PllOn,
            0x0F => Self::Sleep,
            0x11 => Self::BusyRxAack,
            0x12 => Self::BusyTxAret,
            0x16 => Self::RxAackOn,
            0x19 => Self::TxAretOn,
            0x1C => Self::RxOnNoclk,
            0x1D => Self::RxAackOnNoclk,
            0x1E => Self::BusyRxAackNoclk,
            0x1F => Self::StateTransitionInProgress,
            other => Self::Other(other),
        }
    }
}

/// Outcome of the last extended operating mode transaction (TRAC_STATUS).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TracStatus {
    /// Transaction succeeded.
    Success,
    /// Acknowledged with the frame pending bit set.
    SuccessDataPending,
    /// Frame received, acknowledgement still being sent.
    SuccessWaitForAck,
    /// CSMA-CA gave up.
    ChannelAccessFailure,
    /// No acknowledgement after all retries.
    NoAck,
    /// No transaction has completed yet.
    Invalid,
    /// Reserved code.
    Reserved(u8),
}

impl From<u8> for TracStatus {
    fn from(value: u8) -> Self {
        match (value & TRAC_STATUS_MASK) >> TRAC_STATUS_SHIFT {
            0 => Self::Success,
            1 => Self::SuccessDataPending,
            2 => Self::SuccessWaitForAck,
            3 => Self::ChannelAccessFailure,
            5 => Self::NoAck,
            7 => Self::Invalid,
            other => Self::Reserved(other),
        }
    }
}

/// Clear channel assessment mode (PHY_CC_CCA.CCA_MODE).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum CcaMode {
    /// Busy on carrier sense or energy above threshold.
    CarrierSenseOrEnergy = 0,
    /// Busy on energy above threshold.
    #[default]
    EnergyAboveThreshold = 1,
    /// Busy on carrier sense.
    CarrierSense = 2,
    /// Busy on carrier sense with energy above threshold.
    CarrierSenseAndEnergy = 3,
}

impl CcaMode {
    /// Field value, before shifting into PHY_CC_CCA.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl From<u8> for CcaMode {
    fn from(value: u8) -> Self {
        match value & 0x03 {
            0 => Self::CarrierSenseOrEnergy,
            1 => Self::EnergyAboveThreshold,
            2 => Self::CarrierSense,
            _ => Self::CarrierSenseAndEnergy,
        }
    }
}

bitflags! {
    /// Interrupt sources, as laid out in IRQ_MASK and IRQ_STATUS.
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct IrqStatus: u8 {
        /// PLL locked.
        const PLL_LOCK = 1 << 0;
        /// PLL lost lock.
        const PLL_UNLOCK = 1 << 1;
        /// Start of a PSDU reception.
        const RX_START = 1 << 2;
        /// End of a frame transmission or reception.
        const TRX_END = 1 << 3;
        /// CCA or ED measurement complete.
        const CCA_ED_DONE = 1 << 4;
        /// Address match.
        const AMI = 1 << 5;
        /// Frame buffer under run.
        const TRX_UR = 1 << 6;
        /// Supply voltage below the battery monitor threshold.
        const BAT_LOW = 1 << 7;
    }
}

#[cfg(feature = "defmt-0-3")]
impl defmt::Format for IrqStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IrqStatus {{ 0b{0=0..8:08b} }}", self.bits())
    }
}
