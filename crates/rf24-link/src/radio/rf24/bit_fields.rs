use bitfield_struct::bitfield;

use crate::{CrcLength, DataRate, PaLevel};

/// The CONFIG register.
///
/// The IRQ mask bits are stored inverted: `true` means the event is reflected on the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    #[bits(1, access = None)]
    pub rx_dr: bool,

    #[bits(1, access = None)]
    pub tx_ds: bool,

    #[bits(1, access = None)]
    pub max_rt: bool,

    #[bits(2, access = None)]
    pub crc_length: u8,

    #[bits(1, default = true)]
    pub power: bool,

    #[bits(1, default = true)]
    pub is_rx: bool,
}

impl Config {
    pub(crate) const CRC_MASK: u8 = 0b1100;

    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits() & Self::CRC_MASK)
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !Self::CRC_MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    pub fn as_rx(self) -> Self {
        Self::from_bits(self.into_bits() | 1)
    }

    pub fn as_tx(self) -> Self {
        Self::from_bits(self.into_bits() & !1)
    }
}

/// The SETUP_RETR register. Defaults to a 4000 us delay with 3 retries (0xF3).
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 15)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 3)]
    pub arc: u8,
}

/// The RF_SETUP register. Defaults to 250 Kbps at the "high" PA level (0x24).
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRf {
    #[bits(2)]
    _padding: u8,

    #[bits(3, access = None, default = 4)]
    data_rate: u8,

    #[bits(2, access = None, default = 2)]
    pa_level: u8,

    pub lna_enable: bool,
}

impl SetupRf {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits() & DataRate::MASK)
    }

    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_val = self.into_bits() & !DataRate::MASK;
        Self::from_bits(new_val | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits() & PaLevel::MASK)
    }

    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_val = self.into_bits() & !PaLevel::MASK;
        Self::from_bits(new_val | level.into_bits())
    }
}

#[cfg(test)]
mod test {
    use super::{Config, SetupRetry, SetupRf};
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.into_bits(), 0x03);
        assert_eq!(config.as_tx().into_bits(), 0x02);
        assert_eq!(config.as_tx().as_rx().into_bits(), 0x03);
        assert_eq!(config.crc_length(), CrcLength::Disabled);
        let config = config.with_crc_length(CrcLength::Bit16);
        assert_eq!(config.into_bits(), 0x0F);
        assert_eq!(config.crc_length(), CrcLength::Bit16);
        assert!(config.power());
        assert!(config.is_rx());
    }

    #[test]
    fn setup_retry_defaults() {
        assert_eq!(SetupRetry::default().into_bits(), 0xF3);
        assert_eq!(SetupRetry::default().with_ard(1).with_arc(15).into_bits(), 0x1F);
    }

    #[test]
    fn setup_rf_defaults() {
        let rf = SetupRf::default();
        assert_eq!(rf.into_bits(), 0x24);
        assert_eq!(rf.data_rate(), DataRate::Kbps250);
        assert_eq!(rf.pa_level(), PaLevel::High);
        assert!(!rf.lna_enable());
        let rf = rf
            .with_data_rate(DataRate::Mbps2)
            .with_pa_level(PaLevel::Max)
            .with_lna_enable(true);
        assert_eq!(rf.into_bits(), 0x0F);
    }
}
