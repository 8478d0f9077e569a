//! Register and frame buffer access.
//!
//! Every access is a single [`Transport::transfer`]; nothing is cached, so each
//! call hits the chip. Transport failures come back as [`Error::Driver`].

use embedded_hal::delay::DelayNs;

use crate::consts::{
    FRAME_BUFFER_LEN, FRAME_READ_CMD, FRAME_WRITE_CMD, REG_ADDR_MASK, REG_READ_FLAG,
    REG_WRITE_FLAG,
};
use crate::device::Device;
use crate::error::Error;
use crate::frame::TX_FRAME_CAPACITY;
use crate::registers::Register;
use crate::transport::Transport;

impl<T, D> Device<T, D>
where
    T: Transport,
    D: DelayNs,
{
    /// Reads one register.
    pub fn read_register(&mut self, reg: Register) -> Result<u8, Error<T::Error>> {
        let mut buf = [REG_READ_FLAG | (reg.addr() & REG_ADDR_MASK), 0];
        self.transport.transfer(&mut buf).map_err(Error::Driver)?;
        Ok(buf[1])
    }

    /// Writes one register.
    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<(), Error<T::Error>> {
        let mut buf = [REG_WRITE_FLAG | (reg.addr() & REG_ADDR_MASK), value];
        self.transport.transfer(&mut buf).map_err(Error::Driver)
    }

    /// Replaces the bits of `reg` selected by `mask` with the same bits of `value`.
    ///
    /// This is a read followed by a write and is not atomic with respect to the
    /// chip changing the register in between. Nothing is written if the read fails.
    pub fn update_register(
        &mut self,
        reg: Register,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<T::Error>> {
        let current = self.read_register(reg)?;
        self.write_register(reg, (current & !mask) | (value & mask))
    }

    /// Reads `buf.len()` bytes from the start of the frame buffer.
    ///
    /// The first byte is the PHR. Fails with [`Error::Length`] before touching the
    /// bus if `buf` is longer than the frame buffer.
    pub fn read_frame(&mut self, buf: &mut [u8]) -> Result<(), Error<T::Error>> {
        let len = buf.len();
        if len > FRAME_BUFFER_LEN {
            return Err(Error::Length(len));
        }

        let mut raw = [0u8; FRAME_BUFFER_LEN + 1];
        raw[0] = FRAME_READ_CMD;
        self.transport
            .transfer(&mut raw[..=len])
            .map_err(Error::Driver)?;
        buf.copy_from_slice(&raw[1..=len]);
        Ok(())
    }

    /// Writes `frame` to the frame buffer. `frame[0]` must be the PHR.
    ///
    /// # Arguments
    /// - `frame`: the PHR followed by the PSDU, FCS bytes included.
    ///
    /// # Notes
    /// The transmit side of the frame buffer holds the PHR and at most 127 PSDU
    /// bytes. Longer images are rejected with [`Error::Length`] before touching the bus.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error<T::Error>> {
        let len = frame.len();
        if len > TX_FRAME_CAPACITY {
            return Err(Error::Length(len));
        }

        let mut raw = [0u8; TX_FRAME_CAPACITY + 1];
        raw[0] = FRAME_WRITE_CMD;
        raw[1..=len].copy_from_slice(frame);
        self.transport
            .transfer(&mut raw[..=len])
            .map_err(Error::Driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeError, FakeRadio, Op, opened};
    use crate::transport::HalTransport;
    use crate::Config;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn xfer(out: Vec<u8>, back: Vec<u8>) -> [SpiTransaction<u8>; 3] {
        [
            SpiTransaction::transaction_start(),
            SpiTransaction::transfer_in_place(out, back),
            SpiTransaction::transaction_end(),
        ]
    }

    const ALL_REGISTERS: [Register; 47] = [
        Register::TrxStatus,
        Register::TrxState,
        Register::TrxCtrl0,
        Register::TrxCtrl1,
        Register::PhyTxPwr,
        Register::PhyRssi,
        Register::PhyEdLevel,
        Register::PhyCcCca,
        Register::CcaThres,
        Register::RxCtrl,
        Register::SfdValue,
        Register::TrxCtrl2,
        Register::AntDiv,
        Register::IrqMask,
        Register::IrqStatus,
        Register::VregCtrl,
        Register::Batmon,
        Register::XoscCtrl,
        Register::CcCtrl0,
        Register::CcCtrl1,
        Register::RxSyn,
        Register::RfCtrl0,
        Register::XahCtrl1,
        Register::FtnCtrl,
        Register::RfCtrl1,
        Register::PllCf,
        Register::PllDcu,
        Register::PartNum,
        Register::VersionNum,
        Register::ManId0,
        Register::ManId1,
        Register::ShortAddr0,
        Register::ShortAddr1,
        Register::PanId0,
        Register::PanId1,
        Register::IeeeAddr0,
        Register::IeeeAddr1,
        Register::IeeeAddr2,
        Register::IeeeAddr3,
        Register::IeeeAddr4,
        Register::IeeeAddr5,
        Register::IeeeAddr6,
        Register::IeeeAddr7,
        Register::XahCtrl0,
        Register::CsmaSeed0,
        Register::CsmaSeed1,
        Register::CsmaBe,
    ];

    #[test]
    fn test_register_round_trip() {
        let mut device = opened(FakeRadio::new());

        for reg in ALL_REGISTERS {
            for value in 0..=u8::MAX {
                device.write_register(reg, value).unwrap();
                assert_eq!(device.read_register(reg).unwrap(), value, "{:?}", reg);
            }
            device.transport.ops.clear();
        }
    }

    #[test]
    fn test_update_only_touches_masked_bits() {
        let mut device = opened(FakeRadio::new());

        for existing in [0x00, 0xFF, 0xA5, 0x5A, 0x81] {
            for mask in 0..=u8::MAX {
                for value in 0..=u8::MAX {
                    device.transport.set_reg(Register::TrxCtrl1, existing);
                    device
                        .update_register(Register::TrxCtrl1, mask, value)
                        .unwrap();
                    assert_eq!(
                        device.transport.reg(Register::TrxCtrl1),
                        (existing & !mask) | (value & mask)
                    );
                }
                device.transport.ops.clear();
            }
        }
    }

    #[test]
    fn test_update_skips_write_after_failed_read() {
        let mut device = opened(FakeRadio::new());
        device.transport.fail_after = Some(0);

        let err = device
            .update_register(Register::PhyCcCca, 0x1F, 0x0A)
            .unwrap_err();
        assert_eq!(err, Error::Driver(FakeError));
        assert!(device.transport.writes().is_empty());
    }

    #[test]
    fn test_frame_buffer_round_trip() {
        let mut device = opened(FakeRadio::new());

        device.write_frame(&[4, 0xDE, 0xAD, 0, 0]).unwrap();
        let mut buf = [0u8; 3];
        device.read_frame(&mut buf).unwrap();
        assert_eq!(buf, [4, 0xDE, 0xAD]);
        assert_eq!(
            device.transport.ops,
            vec![Op::FrameWrite(vec![4, 0xDE, 0xAD, 0, 0]), Op::FrameRead(3)]
        );
    }

    #[test]
    fn test_frame_access_bounded_by_buffer_size() {
        let mut device = opened(FakeRadio::new());

        let mut buf = [0u8; FRAME_BUFFER_LEN + 1];
        assert_eq!(
            device.read_frame(&mut buf),
            Err(Error::Length(FRAME_BUFFER_LEN + 1))
        );
        assert!(device.transport.ops.is_empty());
    }

    #[test]
    fn test_frame_write_bounded_by_transmit_buffer() {
        let mut device = opened(FakeRadio::new());

        for len in [TX_FRAME_CAPACITY + 1, FRAME_BUFFER_LEN] {
            let image = vec![0u8; len];
            assert_eq!(device.write_frame(&image), Err(Error::Length(len)));
        }
        assert!(device.transport.ops.is_empty());

        let mut image = vec![0u8; TX_FRAME_CAPACITY];
        image[0] = 127;
        device.write_frame(&image).unwrap();
        assert_eq!(device.transport.frame_writes(), vec![image]);
    }

    #[test]
    fn test_wire_encoding() {
        let mut expectations = vec![];
        // read PART_NUM
        expectations.extend(xfer(vec![0x9C, 0x00], vec![0x00, 0x07]));
        // write PHY_TX_PWR
        expectations.extend(xfer(vec![0xC5, 0x41], vec![0x00, 0x00]));
        // peek PHR
        expectations.extend(xfer(vec![0x20, 0x00], vec![0x00, 0x05]));
        // load two bytes
        expectations.extend(xfer(vec![0x60, 0x03, 0xAB], vec![0x00, 0x00, 0x00]));

        // reset pulse with SLP_TR held low
        let rst = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let slp = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let transport = HalTransport::new(SpiMock::new(&expectations), rst, slp, PinMock::new(&[]));

        let mut device = Device {
            transport,
            delay: NoopDelay::new(),
            timing: Config::default().timing,
            shutdown: Config::default().shutdown,
            auto_crc: true,
        };
        device.reset().unwrap();

        assert_eq!(device.read_register(Register::PartNum).unwrap(), 0x07);
        device.write_register(Register::PhyTxPwr, 0x41).unwrap();
        let mut phr = [0u8; 1];
        device.read_frame(&mut phr).unwrap();
        assert_eq!(phr, [0x05]);
        device.write_frame(&[0x03, 0xAB]).unwrap();

        let (transport, _) = device.close();
        let (mut spi, mut rst, mut slp, mut irq) = transport.release();
        spi.done();
        rst.done();
        slp.done();
        irq.done();
    }
}
