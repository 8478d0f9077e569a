//! Transport adapter between the driver and the hardware.
//!
//! The driver never touches a bus directly. Everything it needs from the board is
//! expressed by the [`Transport`] trait: one full duplex SPI exchange, the RST and
//! SLP_TR output lines, and the IRQ input line.
//!
//! [`HalTransport`] implements the trait over `embedded-hal` 1.0 traits, which is
//! what most boards will use. Host-side bridges and test doubles implement
//! [`Transport`] directly.
//!
//! ## Capabilities
//!
//! A transport reports which of the four operations it actually provides through
//! [`Transport::capabilities`]. [`Device::open`](crate::Device::open) checks the
//! reported set against [`Config::required_capabilities`](crate::Config) once, so
//! an incomplete adapter is rejected up front instead of failing halfway through a
//! transmission.

use bitflags::bitflags;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, SpiDevice};

bitflags! {
    /// Operations a [`Transport`] provides.
    #[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
    pub struct Capabilities: u8 {
        /// Full duplex SPI transfer.
        const TRANSFER = 1 << 0;
        /// RST line control.
        const RESET = 1 << 1;
        /// SLP_TR line control.
        const SLEEP_TRIGGER = 1 << 2;
        /// IRQ line read back.
        const IRQ = 1 << 3;
    }
}

#[cfg(feature = "defmt-0-3")]
impl defmt::Format for Capabilities {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Capabilities {{ 0b{0=0..8:08b} }}", self.bits())
    }
}

/// Board specific access to the transceiver.
///
/// Every method maps onto one hardware action. The driver calls them serially and
/// never from more than one context at a time; see [`crate::shared`] for sharing a
/// device with an interrupt handler.
pub trait Transport {
    /// Error reported by the underlying bus or pins.
    type Error: core::fmt::Debug;

    /// Operations this transport implements.
    ///
    /// Defaults to all of them. Transports that cannot drive a line should narrow
    /// this and return an error from the corresponding method.
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    /// Exchanges `buf.len()` bytes in one chip select cycle.
    ///
    /// `buf` holds the outgoing bytes on entry and the bytes clocked in on return.
    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Drives the RST line. `true` is the electrical high level (reset released).
    fn set_reset(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Drives the SLP_TR line. `true` is the electrical high level.
    fn set_sleep_trigger(&mut self, high: bool) -> Result<(), Self::Error>;

    /// Reads the IRQ line. `true` is the electrical high level.
    fn get_irq(&mut self) -> Result<bool, Self::Error>;
}

/// Error type of [`HalTransport`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum HalError {
    /// The SPI device failed.
    Spi(spi::ErrorKind),
    /// One of the GPIO lines failed.
    Pin(digital::ErrorKind),
}

/// [`Transport`] over an `embedded-hal` SPI device and three GPIO lines.
///
/// ## Type Parameters
///
/// - `SPI`: the transceiver's [`SpiDevice`] (mode 0, chip select managed by the device)
/// - `RST`: the RST output line
/// - `SLP`: the SLP_TR output line
/// - `IRQ`: the IRQ input line
///
/// ## Example
///
/// ```rust
/// # use embedded_hal_mock::eh1::spi::Mock as SpiMock;
/// # use embedded_hal_mock::eh1::digital::Mock as PinMock;
/// use at86rf212::transport::HalTransport;
///
/// # let spi = SpiMock::new(&[]);
/// # let (rst, slp, irq) = (PinMock::new(&[]), PinMock::new(&[]), PinMock::new(&[]));
/// let transport = HalTransport::new(spi, rst, slp, irq);
/// # let (mut spi, mut rst, mut slp, mut irq) = transport.release();
/// # spi.done();
/// # rst.done();
/// # slp.done();
/// # irq.done();
/// ```
#[derive(Debug)]
pub struct HalTransport<SPI, RST, SLP, IRQ> {
    spi: SPI,
    reset: RST,
    sleep_trigger: SLP,
    irq: IRQ,
}

impl<SPI, RST, SLP, IRQ> HalTransport<SPI, RST, SLP, IRQ>
where
    SPI: SpiDevice,
    RST: OutputPin,
    SLP: OutputPin,
    IRQ: InputPin,
{
    /// Creates a transport from the SPI device and the three control lines.
    pub fn new(spi: SPI, reset: RST, sleep_trigger: SLP, irq: IRQ) -> Self {
        Self {
            spi,
            reset,
            sleep_trigger,
            irq,
        }
    }

    /// Gives back the wrapped peripherals.
    pub fn release(self) -> (SPI, RST, SLP, IRQ) {
        (self.spi, self.reset, self.sleep_trigger, self.irq)
    }
}

fn pin_error<E: digital::Error>(e: E) -> HalError {
    HalError::Pin(e.kind())
}

impl<SPI, RST, SLP, IRQ> Transport for HalTransport<SPI, RST, SLP, IRQ>
where
    SPI: SpiDevice,
    RST: OutputPin,
    SLP: OutputPin,
    IRQ: InputPin,
{
    type Error = HalError;

    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), HalError> {
        use embedded_hal::spi::Error as _;

        self.spi
            .transfer_in_place(buf)
            .map_err(|e| HalError::Spi(e.kind()))
    }

    fn set_reset(&mut self, high: bool) -> Result<(), HalError> {
        if high {
            self.reset.set_high().map_err(pin_error)
        } else {
            self.reset.set_low().map_err(pin_error)
        }
    }

    fn set_sleep_trigger(&mut self, high: bool) -> Result<(), HalError> {
        if high {
            self.sleep_trigger.set_high().map_err(pin_error)
        } else {
            self.sleep_trigger.set_low().map_err(pin_error)
        }
    }

    fn get_irq(&mut self) -> Result<bool, HalError> {
        self.irq.is_high().map_err(pin_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn test_transfer_is_one_transaction() {
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(vec![0x9C, 0x00], vec![0x00, 0x07]),
            SpiTransaction::transaction_end(),
        ]);
        let mut transport =
            HalTransport::new(spi, PinMock::new(&[]), PinMock::new(&[]), PinMock::new(&[]));

        let mut buf = [0x9C, 0x00];
        transport.transfer(&mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x07]);

        let (mut spi, mut rst, mut slp, mut irq) = transport.release();
        spi.done();
        rst.done();
        slp.done();
        irq.done();
    }

    #[test]
    fn test_pins_follow_requested_levels() {
        let rst = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let slp = PinMock::new(&[PinTransaction::set(PinState::High)]);
        let irq = PinMock::new(&[
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::High),
        ]);
        let mut transport = HalTransport::new(SpiMock::new(&[]), rst, slp, irq);

        transport.set_reset(false).unwrap();
        transport.set_reset(true).unwrap();
        transport.set_sleep_trigger(true).unwrap();
        assert!(!transport.get_irq().unwrap());
        assert!(transport.get_irq().unwrap());
        assert_eq!(transport.capabilities(), Capabilities::all());

        let (mut spi, mut rst, mut slp, mut irq) = transport.release();
        spi.done();
        rst.done();
        slp.done();
        irq.done();
    }
}
