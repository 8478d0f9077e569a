//! Constants used across the AT86RF212 driver.
//!
//! This module defines the SPI command encoding, frame size limits and the
//! default magnitudes for the bounded polling loops.
//!
//! ## Key Concepts
//!
//! - **Command byte**: the first byte of every SPI transaction selects register
//!   read, register write, frame buffer read or frame buffer write.
//! - **PHR**: the one byte PHY header (frame length) that prefixes every frame in
//!   the frame buffer. Its value counts the PSDU including the 2 byte FCS.
//! - **Receive trailer**: after the PSDU the chip appends LQI, ED and RX_STATUS.
//!
//! These values are taken from the AT86RF212 datasheet and must match the hardware.

/// Register read command flag, OR'd with the 6 bit register address.
pub const REG_READ_FLAG: u8 = 0x80;

/// Register write command flag, OR'd with the 6 bit register address.
pub const REG_WRITE_FLAG: u8 = 0xC0;

/// Mask selecting the register address bits of a register access command.
pub const REG_ADDR_MASK: u8 = 0x3F;

/// Frame buffer read command.
pub const FRAME_READ_CMD: u8 = 0x20;

/// Frame buffer write command.
pub const FRAME_WRITE_CMD: u8 = 0x60;

/// Expected contents of `PART_NUM` for the AT86RF212.
pub const PART_NUMBER: u8 = 0x07;

/// Maximum PSDU length (aMaxPHYPacketSize), including the FCS.
pub const MAX_FRAME_LEN: u8 = 127;

/// See [`MAX_FRAME_LEN`](crate::consts::MAX_FRAME_LEN)
pub const MAX_FRAME_LEN_USIZE: usize = MAX_FRAME_LEN as usize;

/// Length of the PHR (frame length field).
pub const LEN_FIELD_LEN: usize = 1;

/// Length of the frame check sequence appended to every PSDU.
pub const CRC_LEN: usize = 2;

/// Bytes the chip appends after a received PSDU: LQI, ED and RX_STATUS.
pub const RX_TRAILER_LEN: usize = 3;

/// Largest payload (PSDU without FCS) accepted by [`start_tx`](crate::Device::start_tx).
pub const MAX_PAYLOAD_LEN: usize = MAX_FRAME_LEN_USIZE - CRC_LEN;

/// Largest number of bytes a single frame buffer access moves, excluding the command byte.
///
/// A full receive read is PHR + PSDU + trailer.
pub const FRAME_BUFFER_LEN: usize = LEN_FIELD_LEN + MAX_FRAME_LEN_USIZE + RX_TRAILER_LEN;

/// Default ceiling for TRX_STATUS polls while a state transition is in progress.
pub const STATE_RETRIES: u32 = 1000;

/// Default ceiling for IRQ_STATUS polls while waiting for PLL lock.
pub const PLL_RETRIES: u32 = 10;

/// Default spacing between PLL lock polls, in microseconds.
pub const PLL_POLL_US: u32 = 1;

/// Default reset pulse width (RST held low), in milliseconds. Datasheet minimum is 1 ms.
pub const RESET_PULSE_MS: u32 = 10;

/// Default settle time after releasing RST, in milliseconds. Datasheet minimum is 10 ms.
pub const RESET_SETTLE_MS: u32 = 100;

/// Default time to wait after lowering SLP_TR before talking to a sleeping chip, in microseconds.
pub const WAKE_SETTLE_US: u32 = 1000;

/// RSSI_BASE_VAL for BPSK-20 (the reset modulation), in dBm.
pub const RSSI_BASE_BPSK_20_DBM: i16 = -100;

/// RSSI_BASE_VAL for BPSK-40, in dBm.
pub const RSSI_BASE_BPSK_40_DBM: i16 = -99;

/// RSSI_BASE_VAL for the O-QPSK modes, in dBm.
pub const RSSI_BASE_OQPSK_DBM: i16 = -98;
