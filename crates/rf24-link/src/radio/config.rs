use crate::radio::rf24::{
    bit_fields::{Config, SetupRetry, SetupRf},
    constants::{MAX_ADDRESS_LEN, PAYLOAD_WIDTH},
};
use crate::{CrcLength, DataRate, PaLevel};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use rf24link::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) setup_rf: SetupRf,
    channel: u8,
    address_length: u8,
    tx_address: [u8; MAX_ADDRESS_LEN],
    rx_address: [u8; MAX_ADDRESS_LEN],
    payload_length: u8,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `2` |
    /// | [`RadioConfig::address_length()`] | `5` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::High`] |
    /// | [`RadioConfig::lna_enable()`] | `false` |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Disabled`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Kbps250`] |
    /// | [`RadioConfig::payload_length()`] | `32` |
    /// | [`RadioConfig::auto_retry_delay()`] | `15` |
    /// | [`RadioConfig::auto_retry_count()`] | `3` |
    /// | [`RadioConfig::tx_address()`] | `[0x03; 5]` |
    /// | [`RadioConfig::rx_address()`] | `[0x03; 5]` |
    fn default() -> Self {
        Self {
            /*
               - CRC disabled
               - powered up
               - RX mode
            */
            config_reg: Config::default(),
            /*
               - 15 * 250 + 250 = 4000 us delay between attempts
               - 3 max attempts
            */
            auto_retries: SetupRetry::default(),
            /*
                - 250 Kbps data rate
                - High PA level
                - LNA disabled
            */
            setup_rf: SetupRf::default(),
            channel: 2,
            address_length: 5,
            tx_address: [0x03; MAX_ADDRESS_LEN],
            rx_address: [0x03; MAX_ADDRESS_LEN],
            payload_length: PAYLOAD_WIDTH as u8,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_config = self.config_reg.with_crc_length(length);
        Self {
            config_reg: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.setup_rf.data_rate()
    }

    /// The Data Rate (over the air).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        let new_config = self.setup_rf.with_data_rate(data_rate);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.setup_rf.pa_level()
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        let new_config = self.setup_rf.with_pa_level(level);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.setup_rf.lna_enable()
    }

    /// Enable or disable the chip's Low Noise Amplifier (LNA) feature.
    ///
    /// This value may not be respected depending on the radio module used.
    pub fn with_lna_enable(self, enable: bool) -> Self {
        let new_config = self.setup_rf.with_lna_enable(enable);
        Self {
            setup_rf: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_length()`].
    pub const fn address_length(&self) -> u8 {
        self.address_length
    }

    /// The address length.
    ///
    /// This value is clamped to range [3, 5].
    pub fn with_address_length(self, value: u8) -> Self {
        Self {
            address_length: value.clamp(3, MAX_ADDRESS_LEN as u8),
            ..self
        }
    }

    /// The value written to the SETUP_AW register.
    pub(crate) const fn address_width_code(&self) -> u8 {
        self.address_length - 2
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// Both are clamped to range [0, 15]. The actual delay between attempts is
    /// `delay * 250 + 250` microseconds.
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        let new_config = self
            .auto_retries
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        Self {
            auto_retries: new_config,
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_payload_length()`].
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// The fixed payload width used for every packet.
    ///
    /// This value is clamped to range [1, 32].
    pub fn with_payload_length(self, value: u8) -> Self {
        Self {
            payload_length: value.clamp(1, PAYLOAD_WIDTH as u8),
            ..self
        }
    }

    /// Get the address set by [`RadioConfig::with_tx_address()`],
    /// trimmed to [`RadioConfig::address_length()`].
    pub fn tx_address(&self) -> &[u8] {
        &self.tx_address[..self.address_length as usize]
    }

    /// Set the TX address.
    ///
    /// Only up to 5 bytes are used. Missing bytes keep their previous value.
    pub fn with_tx_address(self, address: &[u8]) -> Self {
        let mut tx_address = self.tx_address;
        let len = address.len().min(MAX_ADDRESS_LEN);
        tx_address[..len].copy_from_slice(&address[..len]);
        Self { tx_address, ..self }
    }

    /// Get the address set by [`RadioConfig::with_rx_address()`],
    /// trimmed to [`RadioConfig::address_length()`].
    pub fn rx_address(&self) -> &[u8] {
        &self.rx_address[..self.address_length as usize]
    }

    /// Set the address of RX pipe 0.
    ///
    /// Only up to 5 bytes are used. Missing bytes keep their previous value.
    pub fn with_rx_address(self, address: &[u8]) -> Self {
        let mut rx_address = self.rx_address;
        let len = address.len().min(MAX_ADDRESS_LEN);
        rx_address[..len].copy_from_slice(&address[..len]);
        Self { rx_address, ..self }
    }
}

#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert_eq!(config.channel(), 2);
        assert_eq!(config.address_length(), 5);
        assert_eq!(config.address_width_code(), 3);
        assert_eq!(config.tx_address(), &[3; 5]);
        assert_eq!(config.rx_address(), &[3; 5]);
        assert_eq!(config.data_rate(), DataRate::Kbps250);
        assert_eq!(config.pa_level(), PaLevel::High);
        assert!(!config.lna_enable());
        assert_eq!(config.crc_length(), CrcLength::Disabled);
        assert_eq!(config.auto_retry_delay(), 15);
        assert_eq!(config.auto_retry_count(), 3);
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.setup_rf.into_bits(), 0x24);
        assert_eq!(config.auto_retries.into_bits(), 0xF3);
        assert_eq!(config.config_reg.into_bits(), 0x03);
    }

    #[test]
    fn crc_length() {
        let mut config = RadioConfig::default();
        for len in [CrcLength::Disabled, CrcLength::Bit16, CrcLength::Bit8] {
            config = config.with_crc_length(len);
            assert_eq!(len, config.crc_length());
        }
    }

    #[test]
    fn clamped_values() {
        let config = RadioConfig::default()
            .with_channel(200)
            .with_address_length(1)
            .with_payload_length(0)
            .with_auto_retries(20, 20);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.address_length(), 3);
        assert_eq!(config.payload_length(), 1);
        assert_eq!(config.auto_retry_delay(), 15);
        assert_eq!(config.auto_retry_count(), 15);
        let config = config.with_address_length(9).with_payload_length(99);
        assert_eq!(config.address_length(), 5);
        assert_eq!(config.payload_length(), 32);
    }

    #[test]
    fn addresses() {
        let config = RadioConfig::default()
            .with_tx_address(b"1Node")
            .with_rx_address(&[0xAB, 0xCD])
            .with_address_length(3);
        assert_eq!(config.tx_address(), b"1No");
        assert_eq!(config.rx_address(), &[0xAB, 0xCD, 3]);
    }

    #[test]
    fn rf_setup() {
        let config = RadioConfig::default()
            .with_data_rate(DataRate::Mbps1)
            .with_pa_level(PaLevel::Min)
            .with_lna_enable(true);
        assert_eq!(config.data_rate(), DataRate::Mbps1);
        assert_eq!(config.pa_level(), PaLevel::Min);
        assert!(config.lna_enable());
        assert_eq!(config.setup_rf.into_bits(), 0x01);
    }
}
