//! Device handle, lifecycle and the TRX state machine.
//!
//! A [`Device`] owns the [`Transport`] and a [`DelayNs`] for as long as the
//! transceiver is open. [`Device::open`] is the only way to obtain one and
//! [`Device::close`] consumes it, so every register and frame operation is
//! statically tied to an opened, identified and configured chip.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use at86rf212::Transport;
//! # #[derive(Debug)]
//! # struct Board([u8; 0x40]);
//! # impl Transport for Board {
//! #     type Error = ();
//! #     fn transfer(&mut self, buf: &mut [u8]) -> Result<(), ()> {
//! #         let addr = (buf[0] & 0x3F) as usize;
//! #         match buf[0] & 0xC0 {
//! #             0xC0 => self.0[addr] = buf[1],
//! #             0x80 if addr == 0x01 => buf[1] = 0x08,
//! #             0x80 => buf[1] = self.0[addr],
//! #             _ => {}
//! #         }
//! #         Ok(())
//! #     }
//! #     fn set_reset(&mut self, _: bool) -> Result<(), ()> { Ok(()) }
//! #     fn set_sleep_trigger(&mut self, _: bool) -> Result<(), ()> { Ok(()) }
//! #     fn get_irq(&mut self) -> Result<bool, ()> { Ok(false) }
//! # }
//! # let mut regs = [0u8; 0x40];
//! # regs[0x1C] = 0x07;
//! # regs[0x10] = 0x44;
//! # let board = Board(regs);
//! use at86rf212::{Config, Device, TrxStatus};
//!
//! let mut radio = Device::open(board, NoopDelay::new(), Config::default()).unwrap();
//! assert_eq!(radio.get_state().unwrap(), TrxStatus::TrxOff);
//! assert_eq!(radio.get_channel().unwrap(), 1);
//!
//! let (_board, _delay) = radio.close();
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::{Config, ShutdownPolicy, Timing};
use crate::consts::PART_NUMBER;
use crate::error::Error;
use crate::registers::{
    IrqStatus, Register, TRX_CMD_MASK, TrxCmd, TrxStatus, VREG_CTRL_DVDD_OK,
};
use crate::transport::{Capabilities, Transport};

/// An opened AT86RF212.
///
/// ## Type Parameters
///
/// - `T`: the [`Transport`] the chip is reached through
/// - `D`: a [`DelayNs`] used for reset timing and poll spacing
#[derive(Debug)]
pub struct Device<T, D> {
    pub(crate) transport: T,
    pub(crate) delay: D,
    pub(crate) timing: Timing,
    pub(crate) shutdown: ShutdownPolicy,
    /// Mirrors TRX_CTRL_1.TX_AUTO_CRC_ON.
    pub(crate) auto_crc: bool,
}

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Resets, identifies and configures the transceiver.
    ///
    /// The sequence is:
    ///
    /// 1. check the transport against [`Config::required_capabilities`]
    /// 2. pulse RST (skipped if the transport has no reset line)
    /// 3. read PART_NUM and compare it with the AT86RF212 part number
    /// 4. go to TRX_OFF
    /// 5. check that the digital supply regulator reports a good voltage
    /// 6. program `config`
    ///
    /// # Arguments
    /// - `transport`: bus and control lines the chip is wired to.
    /// - `delay`: used for the reset pulse and between status polls.
    /// - `config`: settings programmed after identification.
    ///
    /// # Returns
    /// A ready handle in TRX_OFF, or the first error hit along the way:
    /// [`Error::InvalidDriver`], [`Error::Comms`], [`Error::Supply`],
    /// [`Error::RetriesExceeded`] or [`Error::Driver`].
    ///
    /// # Notes
    /// Any error means the chip is not usable; the transport is dropped with the
    /// partially constructed handle.
    pub fn open(transport: T, delay: D, config: Config) -> Result<Self, Error<T::Error>> {
        let missing = config
            .required_capabilities
            .difference(transport.capabilities());
        if !missing.is_empty() {
            warn!("transport lacks required capabilities {:?}", missing);
            return Err(Error::InvalidDriver(missing));
        }

        let mut device = Self {
            transport,
            delay,
            timing: config.timing,
            shutdown: config.shutdown,
            auto_crc: config.auto_crc,
        };

        device.reset()?;

        let part = device.read_register(Register::PartNum)?;
        if part != PART_NUMBER {
            warn!("unexpected part number {}", part);
            return Err(Error::Comms(part));
        }
        let version = device.read_register(Register::VersionNum)?;
        info!("AT86RF212 found, version {}", version);

        // TRX_OFF is the only command accepted in P_ON
        let _ = device.set_state_blocking(TrxCmd::TrxOff)?;

        if device.read_register(Register::VregCtrl)? & VREG_CTRL_DVDD_OK == 0 {
            warn!("DVDD not ok");
            return Err(Error::Supply);
        }

        device.configure(&config)?;
        debug!("configured for channel {}", config.channel);
        Ok(device)
    }

    /// Applies the shutdown policy and hands back the transport and delay.
    ///
    /// Never fails: if the chip cannot be put into the requested state the problem
    /// is logged and the peripherals are returned anyway.
    pub fn close(mut self) -> (T, D) {
        let result = match self.shutdown {
            ShutdownPolicy::LeaveRunning => Ok(()),
            ShutdownPolicy::TrxOff => self.set_state_blocking(TrxCmd::ForceTrxOff).map(|_| ()),
            ShutdownPolicy::Sleep => self.sleep(),
        };
        if result.is_err() {
            warn!("shutdown policy {:?} could not be applied", self.shutdown);
        }
        (self.transport, self.delay)
    }

    /// Writes `cmd` to TRX_STATE without waiting for the transition.
    pub fn set_state(&mut self, cmd: TrxCmd) -> Result<(), Error<T::Error>> {
        self.write_register(Register::TrxState, cmd as u8 & TRX_CMD_MASK)
    }

    /// Writes `cmd` to TRX_STATE and polls TRX_STATUS until the chip is no longer
    /// in STATE_TRANSITION_IN_PROGRESS.
    ///
    /// # Returns
    /// The state the chip settled in.
    ///
    /// # Notes
    /// Polling stops after [`Timing::state_retries`] reads with
    /// [`Timing::state_poll_us`] between them, and the failure is reported as
    /// [`Error::RetriesExceeded`] so it can be told apart from a bus failure.
    /// A settled state other than the one requested is not an error.
    pub fn set_state_blocking(&mut self, cmd: TrxCmd) -> Result<TrxStatus, Error<T::Error>> {
        self.set_state(cmd)?;

        for _ in 0..self.timing.state_retries {
            let status = self.get_state()?;
            if status != TrxStatus::StateTransitionInProgress {
                debug!("{:?} -> {:?}", cmd, status);
                return Ok(status);
            }
            self.delay.delay_us(self.timing.state_poll_us);
        }

        warn!(
            "{:?} still in transition after {} polls",
            cmd, self.timing.state_retries
        );
        Err(Error::RetriesExceeded(self.timing.state_retries))
    }

    /// Reads the current state from TRX_STATUS.
    ///
    /// Only the state code is decoded; the CCA bits sharing the register are ignored.
    pub fn get_state(&mut self) -> Result<TrxStatus, Error<T::Error>> {
        self.read_register(Register::TrxStatus).map(TrxStatus::from)
    }

    /// Forces TRX_OFF and raises SLP_TR to put the chip to sleep.
    ///
    /// The register bus is unavailable until [`wake`](Self::wake) is called.
    pub fn sleep(&mut self) -> Result<(), Error<T::Error>> {
        let _ = self.set_state_blocking(TrxCmd::ForceTrxOff)?;
        self.transport
            .set_sleep_trigger(true)
            .map_err(Error::Driver)?;
        debug!("sleeping");
        Ok(())
    }

    /// Lowers SLP_TR, waits for the oscillator and returns to TRX_OFF.
    pub fn wake(&mut self) -> Result<TrxStatus, Error<T::Error>> {
        self.transport
            .set_sleep_trigger(false)
            .map_err(Error::Driver)?;
        self.delay.delay_us(self.timing.wake_settle_us);
        self.set_state_blocking(TrxCmd::TrxOff)
    }

    /// Waits for PLL_LOCK in IRQ_STATUS.
    ///
    /// Reading IRQ_STATUS clears it, so any other pending source seen here is lost.
    pub(crate) fn await_pll_lock(&mut self) -> Result<(), Error<T::Error>> {
        for _ in 0..self.timing.pll_retries {
            if self.irq_status()?.contains(IrqStatus::PLL_LOCK) {
                return Ok(());
            }
            self.delay.delay_us(self.timing.pll_poll_us);
        }
        warn!("no PLL lock after {} polls", self.timing.pll_retries);
        Err(Error::Pll)
    }

    /// Common start of both transmit and receive: TRX_OFF, clear IRQs, PLL_ON, lock.
    pub(crate) fn enter_pll_on(&mut self) -> Result<(), Error<T::Error>> {
        let _ = self.set_state_blocking(TrxCmd::ForceTrxOff)?;
        let _ = self.irq_status()?;
        let _ = self.set_state_blocking(TrxCmd::PllOn)?;
        self.await_pll_lock()
    }

    pub(crate) fn reset(&mut self) -> Result<(), Error<T::Error>> {
        let capabilities = self.transport.capabilities();
        if !capabilities.contains(Capabilities::RESET) {
            debug!("no reset line, skipping reset pulse");
            return Ok(());
        }

        self.transport.set_reset(true).map_err(Error::Driver)?;
        if capabilities.contains(Capabilities::SLEEP_TRIGGER) {
            self.transport
                .set_sleep_trigger(false)
                .map_err(Error::Driver)?;
        }
        self.transport.set_reset(false).map_err(Error::Driver)?;
        self.delay.delay_ms(self.timing.reset_pulse_ms);
        self.transport.set_reset(true).map_err(Error::Driver)?;
        self.delay.delay_ms(self.timing.reset_settle_ms);
        Ok(())
    }

    fn configure(&mut self, config: &Config) -> Result<(), Error<T::Error>> {
        self.set_channel(config.channel)?;
        self.set_cca_mode(config.cca_mode)?;
        self.set_csma_be(config.csma_be_min, config.csma_be_max)?;
        self.set_max_csma_backoffs(config.max_csma_backoffs)?;
        self.set_promiscuous(config.promiscuous)?;
        self.set_auto_crc(config.auto_crc)?;
        self.set_irq_mask_mode(config.irq_mask_mode)?;
        self.set_frame_buffer_protection(config.frame_buffer_protection)?;
        self.set_irq_mask(config.irq_mask)?;
        self.set_tx_power(config.tx_power)
    }
}
