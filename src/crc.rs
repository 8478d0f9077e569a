//! IEEE 802.15.4 frame check sequence.
//!
//! The FCS is the ITU-T CRC-16 processed LSB first with a zero initial value
//! (CRC-16/KERMIT), sent least significant byte first. The chip computes it in
//! hardware when TX_AUTO_CRC_ON is set; these helpers cover the case where it is not.

pub(crate) fn crc_ccitt_update(crc: u16, data: &u8) -> u16 {
    let mut d = *data as u16;
    d ^= lo8(crc);
    d ^= d << 4;
    d &= 0xff;

    ((d << 8) | hi8(crc)) ^ (d >> 4) ^ (d << 3)
}

/// FCS over `data`, in the byte order it goes on air.
pub(crate) fn fcs(data: &[u8]) -> [u8; 2] {
    data.iter()
        .fold(0u16, |crc, b| crc_ccitt_update(crc, b))
        .to_le_bytes()
}

/// True if the last two bytes of `psdu` are a valid FCS over the rest.
pub(crate) fn fcs_ok(psdu: &[u8]) -> bool {
    // Running the CRC over data followed by its own FCS leaves a zero residue
    psdu.len() >= 2 && psdu.iter().fold(0u16, |crc, b| crc_ccitt_update(crc, b)) == 0
}

fn lo8(x: u16) -> u16 {
    x & 0xff
}

fn hi8(x: u16) -> u16 {
    x >> 8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kermit_check_value() {
        assert_eq!(fcs(b"123456789"), [0x89, 0x21]);
    }

    #[test]
    fn test_residue_accepts_own_fcs() {
        let mut psdu = [0x41, 0x88, 0x01, 0xcd, 0xab, 0xff, 0xff, 0x00, 0x00];
        let sum = fcs(&psdu[..7]);
        psdu[7..].copy_from_slice(&sum);
        assert!(fcs_ok(&psdu));

        psdu[2] ^= 0x10;
        assert!(!fcs_ok(&psdu));
    }
}
