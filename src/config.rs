//! Radio configuration applied by [`Device::open`](crate::Device::open).

use crate::consts::{
    PLL_POLL_US, PLL_RETRIES, RESET_PULSE_MS, RESET_SETTLE_MS, STATE_RETRIES, WAKE_SETTLE_US,
};
use crate::registers::{CcaMode, IrqStatus};
use crate::transport::Capabilities;

/// What [`Device::close`](crate::Device::close) does to the chip before handing the
/// transport back.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ShutdownPolicy {
    /// Leave the transceiver in whatever state it is in.
    #[default]
    LeaveRunning,
    /// Force the transceiver to TRX_OFF.
    TrxOff,
    /// Force TRX_OFF, then raise SLP_TR to enter SLEEP.
    Sleep,
}

/// Retry ceilings and delays for the blocking parts of the driver.
///
/// All waits in the driver are bounded by iteration counts; the per-iteration
/// delays are performed through the `DelayNs` passed to
/// [`Device::open`](crate::Device::open).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Timing {
    /// How long RST is held low, in milliseconds.
    pub reset_pulse_ms: u32,
    /// How long to wait after releasing RST, in milliseconds.
    pub reset_settle_ms: u32,
    /// TRX_STATUS polls allowed while a transition is in progress.
    pub state_retries: u32,
    /// Delay between TRX_STATUS polls, in microseconds.
    pub state_poll_us: u32,
    /// IRQ_STATUS polls allowed while waiting for PLL lock.
    pub pll_retries: u32,
    /// Delay between PLL lock polls, in microseconds.
    pub pll_poll_us: u32,
    /// Delay between lowering SLP_TR and the first SPI access, in microseconds.
    pub wake_settle_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_pulse_ms: RESET_PULSE_MS,
            reset_settle_ms: RESET_SETTLE_MS,
            state_retries: STATE_RETRIES,
            state_poll_us: 0,
            pll_retries: PLL_RETRIES,
            pll_poll_us: PLL_POLL_US,
            wake_settle_us: WAKE_SETTLE_US,
        }
    }
}

/// Settings programmed into the transceiver when it is opened.
///
/// ## Example
///
/// ```rust
/// use at86rf212::{Config, ShutdownPolicy};
///
/// let config = Config {
///     channel: 4,
///     promiscuous: false,
///     shutdown: ShutdownPolicy::Sleep,
///     ..Config::default()
/// };
/// assert_eq!(config.csma_be_min, 3);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Config {
    /// Channel number (PHY_CC_CCA.CHANNEL, 5 bits).
    pub channel: u8,
    /// Clear channel assessment mode.
    pub cca_mode: CcaMode,
    /// Minimum CSMA backoff exponent (4 bits).
    pub csma_be_min: u8,
    /// Maximum CSMA backoff exponent (4 bits).
    pub csma_be_max: u8,
    /// Maximum number of CSMA backoffs (3 bits).
    pub max_csma_backoffs: u8,
    /// Accept frames regardless of addressing.
    pub promiscuous: bool,
    /// Let the chip generate the FCS on transmit.
    pub auto_crc: bool,
    /// Report masked interrupt sources in IRQ_STATUS.
    pub irq_mask_mode: bool,
    /// Protect the frame buffer from being overwritten before it is read.
    pub frame_buffer_protection: bool,
    /// Interrupt sources routed to the IRQ line.
    pub irq_mask: IrqStatus,
    /// Raw PHY_TX_PWR value.
    pub tx_power: u8,
    /// Transport operations that must be present.
    pub required_capabilities: Capabilities,
    /// Polling budgets and delays.
    pub timing: Timing,
    /// Behaviour of [`Device::close`](crate::Device::close).
    pub shutdown: ShutdownPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: 1,
            cca_mode: CcaMode::EnergyAboveThreshold,
            csma_be_min: 3,
            csma_be_max: 5,
            max_csma_backoffs: 4,
            promiscuous: true,
            auto_crc: true,
            irq_mask_mode: true,
            frame_buffer_protection: true,
            irq_mask: IrqStatus::RX_START | IrqStatus::TRX_END,
            // PHY_TX_PWR reset value
            tx_power: 0x60,
            required_capabilities: Capabilities::all(),
            timing: Timing::default(),
            shutdown: ShutdownPolicy::LeaveRunning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing_matches_datasheet_budget() {
        let timing = Timing::default();
        assert_eq!(timing.state_retries, 1000);
        assert_eq!(timing.pll_retries, 10);
        assert_eq!(timing.pll_poll_us, 1);
        assert!(timing.reset_pulse_ms >= 1);
        assert!(timing.reset_settle_ms >= 10);
    }

    #[test]
    fn test_default_config_requires_full_transport() {
        let config = Config::default();
        assert_eq!(config.required_capabilities, Capabilities::all());
        assert_eq!(config.irq_mask.bits(), 0x0C);
        assert_eq!(config.shutdown, ShutdownPolicy::LeaveRunning);
    }
}
