//! Simulated transceiver for unit tests.
//!
//! [`FakeRadio`] decodes the SPI command bytes, keeps a register file and a frame
//! buffer, reacts to TRX_STATE commands the way the chip's state machine does and
//! records every operation so tests can assert on ordering.

use crate::consts::{FRAME_READ_CMD, FRAME_WRITE_CMD, PART_NUMBER, REG_ADDR_MASK};
use crate::registers::{
    IrqStatus, Register, TRX_CMD_MASK, TRX_STATUS_MASK, VREG_CTRL_AVDD_OK, VREG_CTRL_DVDD_OK,
};
use crate::transport::{Capabilities, Transport};
use crate::{Config, Device};

use embedded_hal_mock::eh1::delay::NoopDelay;

/// One transport call as seen by the fake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Reset(bool),
    SleepTrigger(bool),
    Irq,
    Read(u8),
    Write(u8, u8),
    FrameRead(usize),
    FrameWrite(Vec<u8>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FakeError;

#[derive(Debug)]
pub(crate) struct FakeRadio {
    pub(crate) regs: [u8; 0x40],
    pub(crate) frame: Vec<u8>,
    pub(crate) ops: Vec<Op>,
    pub(crate) caps: Capabilities,
    /// TRX_STATUS reads that report a transition in progress after each command.
    pub(crate) settle_polls: u32,
    /// TRX_STATUS is pinned to STATE_TRANSITION_IN_PROGRESS.
    pub(crate) stuck: bool,
    /// PLL_ON raises PLL_LOCK.
    pub(crate) pll_locks: bool,
    /// Transfers that succeed before every further transfer fails.
    pub(crate) fail_after: Option<usize>,
    pub(crate) irq_line: bool,
    pending: u32,
}

impl FakeRadio {
    pub(crate) fn new() -> Self {
        let mut regs = [0u8; 0x40];
        regs[Register::PartNum.addr() as usize] = PART_NUMBER;
        regs[Register::VregCtrl.addr() as usize] = VREG_CTRL_DVDD_OK | VREG_CTRL_AVDD_OK;
        regs[Register::PhyTxPwr.addr() as usize] = 0x60;
        Self {
            regs,
            frame: Vec::new(),
            ops: Vec::new(),
            caps: Capabilities::all(),
            settle_polls: 0,
            stuck: false,
            pll_locks: true,
            fail_after: None,
            irq_line: false,
            pending: 0,
        }
    }

    pub(crate) fn reg(&self, reg: Register) -> u8 {
        self.regs[reg.addr() as usize]
    }

    pub(crate) fn set_reg(&mut self, reg: Register, value: u8) {
        self.regs[reg.addr() as usize] = value;
    }

    /// Register writes only, in order.
    pub(crate) fn writes(&self) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(addr, value) => Some((*addr, *value)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, wanted: &Op) -> usize {
        self.ops.iter().filter(|op| *op == wanted).count()
    }

    pub(crate) fn frame_writes(&self) -> Vec<Vec<u8>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::FrameWrite(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    fn read(&mut self, addr: u8) -> u8 {
        match addr {
            a if a == Register::TrxStatus.addr() => {
                if self.stuck {
                    return 0x1F;
                }
                if self.pending > 0 {
                    self.pending -= 1;
                    return 0x1F;
                }
                self.regs[a as usize]
            }
            a if a == Register::IrqStatus.addr() => {
                // IRQ_STATUS clears on read
                let value = self.regs[a as usize];
                self.regs[a as usize] = 0;
                value
            }
            a => self.regs[a as usize],
        }
    }

    fn write(&mut self, addr: u8, value: u8) {
        self.regs[addr as usize] = value;
        if addr != Register::TrxState.addr() {
            return;
        }

        let irq = Register::IrqStatus.addr() as usize;
        let status = match value & TRX_CMD_MASK {
            0x03 | 0x08 => 0x08,
            0x04 | 0x09 => {
                if self.pll_locks {
                    self.regs[irq] |= IrqStatus::PLL_LOCK.bits();
                }
                0x09
            }
            0x06 => {
                // a loaded frame counts as already received
                if !self.frame.is_empty() {
                    self.regs[irq] |= IrqStatus::TRX_END.bits();
                }
                0x06
            }
            0x02 => {
                // the frame goes out immediately
                self.regs[irq] |= IrqStatus::TRX_END.bits();
                0x09
            }
            0x16 => 0x16,
            0x19 => 0x19,
            _ => return,
        };
        let trx_status = Register::TrxStatus.addr() as usize;
        self.regs[trx_status] = (self.regs[trx_status] & !TRX_STATUS_MASK) | status;
        self.pending = self.settle_polls;
    }
}

impl Transport for FakeRadio {
    type Error = FakeError;

    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    fn transfer(&mut self, buf: &mut [u8]) -> Result<(), FakeError> {
        if let Some(remaining) = self.fail_after {
            if remaining == 0 {
                return Err(FakeError);
            }
            self.fail_after = Some(remaining - 1);
        }

        match buf[0] {
            FRAME_READ_CMD => {
                let len = buf.len() - 1;
                self.ops.push(Op::FrameRead(len));
                for (i, b) in buf[1..].iter_mut().enumerate() {
                    *b = self.frame.get(i).copied().unwrap_or(0);
                }
            }
            FRAME_WRITE_CMD => {
                self.ops.push(Op::FrameWrite(buf[1..].to_vec()));
                self.frame = buf[1..].to_vec();
            }
            cmd if cmd & 0xC0 == 0xC0 => {
                let addr = cmd & REG_ADDR_MASK;
                self.ops.push(Op::Write(addr, buf[1]));
                self.write(addr, buf[1]);
            }
            cmd if cmd & 0xC0 == 0x80 => {
                let addr = cmd & REG_ADDR_MASK;
                self.ops.push(Op::Read(addr));
                buf[1] = self.read(addr);
            }
            cmd => panic!("unexpected command byte {:#04x}", cmd),
        }
        Ok(())
    }

    fn set_reset(&mut self, high: bool) -> Result<(), FakeError> {
        self.ops.push(Op::Reset(high));
        Ok(())
    }

    fn set_sleep_trigger(&mut self, high: bool) -> Result<(), FakeError> {
        self.ops.push(Op::SleepTrigger(high));
        if high && self.reg(Register::TrxStatus) & TRX_STATUS_MASK == 0x08 {
            self.set_reg(Register::TrxStatus, 0x0F);
        } else if !high && self.reg(Register::TrxStatus) & TRX_STATUS_MASK == 0x0F {
            self.set_reg(Register::TrxStatus, 0x08);
        }
        Ok(())
    }

    fn get_irq(&mut self) -> Result<bool, FakeError> {
        self.ops.push(Op::Irq);
        Ok(self.irq_line)
    }
}

/// Opens a device on `radio` with the default configuration and clears the op log.
pub(crate) fn opened(radio: FakeRadio) -> Device<FakeRadio, NoopDelay> {
    let mut device = Device::open(radio, NoopDelay::new(), Config::default()).unwrap();
    device.transport.ops.clear();
    device
}
