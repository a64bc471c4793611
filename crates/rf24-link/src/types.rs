//! This module defines the value types exchanged with the driver.

use core::{
    fmt::{Display, Formatter, Result},
    ops::Deref,
    write,
};

use bitfield_struct::bitfield;

use crate::radio::rf24::constants::PAYLOAD_WIDTH;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl PaLevel {
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The length of a CRC checksum that is used (if any).
///
/// Cyclical Redundancy Checking (CRC) is commonly used to ensure data integrity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrcLength {
    /// represents no CRC checksum is used
    Disabled,
    /// represents CRC 8 bit checksum is used
    Bit8,
    /// represents CRC 16 bit checksum is used
    Bit16,
}

impl CrcLength {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value {
            0 => CrcLength::Disabled,
            8 => CrcLength::Bit8,
            _ => CrcLength::Bit16,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// The primary operating mode of the radio.
///
/// There is no third "unknown" state: a freshly constructed driver is
/// always in [`Mode::Receive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// PRIM_RX asserted and CE held high; the radio listens on pipe 0.
    #[default]
    Receive,
    /// PRIM_RX cleared; CE stays low until a payload is pulsed out.
    Transmit,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::Receive => defmt::write!(fmt, "RX"),
            Mode::Transmit => defmt::write!(fmt, "TX"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::Receive => write!(f, "RX"),
            Mode::Transmit => write!(f, "TX"),
        }
    }
}

/// The radio-level result of a completed transmission attempt.
///
/// None of these are driver faults; a failure to talk to the radio at all
/// is reported through the `Err` side instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The "TX Data Sent" flag was raised.
    Sent,
    /// The "max retransmits" flag was raised. The TX FIFO has been flushed.
    MaxRetransmitsExceeded,
    /// Neither flag was raised yet when the status was polled.
    Pending,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxOutcome::Sent => defmt::write!(fmt, "Sent"),
            TxOutcome::MaxRetransmitsExceeded => defmt::write!(fmt, "MaxRetransmitsExceeded"),
            TxOutcome::Pending => defmt::write!(fmt, "Pending"),
        }
    }
}

impl Display for TxOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TxOutcome::Sent => write!(f, "Sent"),
            TxOutcome::MaxRetransmitsExceeded => write!(f, "MaxRetransmitsExceeded"),
            TxOutcome::Pending => write!(f, "Pending"),
        }
    }
}

/// A payload fetched from the RX FIFO.
///
/// The storage is always [`PAYLOAD_WIDTH`] bytes; only the first
/// [`Payload::len()`] bytes (the configured payload width) are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payload {
    buf: [u8; PAYLOAD_WIDTH],
    len: u8,
}

impl Payload {
    /// Copy up to [`PAYLOAD_WIDTH`] bytes from `data`.
    pub fn new(data: &[u8]) -> Self {
        let len = data.len().min(PAYLOAD_WIDTH);
        let mut buf = [0u8; PAYLOAD_WIDTH];
        buf[..len].copy_from_slice(&data[..len]);
        Self {
            buf,
            len: len as u8,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    pub const fn len(&self) -> usize {
        self.len as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Deref for Payload {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Payload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Payload {=[u8]:02X}", self.as_bytes())
    }
}

/// A struct used to describe the STATUS byte that leads every SPI response.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24link::StatusFlags;
///
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the maximum number of retransmits was reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload available in the RX FIFO (7 means empty).
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::RX_DR_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::TX_DS_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }

    /// A flag to describe if the maximum number of retransmits was reached.
    pub fn with_max_rt(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::MAX_RT_OFFSET);
        if flag {
            Self::from_bits(new_val | (1 << Self::MAX_RT_OFFSET))
        } else {
            Self::from_bits(new_val)
        }
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt()
        )
    }
}

/// The FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FifoStatus {
    #[bits(1)]
    _padding: u8,

    /// The last TX payload is being reused.
    #[bits(1, access = RO)]
    pub tx_reuse: bool,

    #[bits(1, access = RO)]
    pub tx_full: bool,

    #[bits(1, access = RO)]
    pub tx_empty: bool,

    #[bits(2)]
    _reserved: u8,

    #[bits(1, access = RO)]
    pub rx_full: bool,

    #[bits(1, access = RO)]
    pub rx_empty: bool,
}

#[cfg(test)]
mod test {
    use super::{CrcLength, DataRate, FifoStatus, Mode, PaLevel, Payload, StatusFlags, TxOutcome};
    extern crate std;
    use std::{format, string::String};

    fn display_crc(param: CrcLength, expected: String) -> bool {
        format!("{param}") == expected
    }

    #[test]
    fn crc_8bit() {
        assert!(display_crc(CrcLength::Bit8, String::from("8 bit")));
    }

    #[test]
    fn crc_16bit() {
        assert!(display_crc(CrcLength::Bit16, String::from("16 bit")));
    }

    #[test]
    fn crc_disable() {
        assert!(display_crc(CrcLength::Disabled, String::from("disabled")));
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::from_bits(0x24), DataRate::Kbps250);
        assert_eq!(DataRate::from_bits(0x0E), DataRate::Mbps2);
        assert_eq!(format!("{}", DataRate::Mbps1), "1 Mbps");
    }

    #[test]
    fn pa_level_bits() {
        assert_eq!(PaLevel::from_bits(0x24), PaLevel::High);
        assert_eq!(format!("{}", PaLevel::Max), "Max");
    }

    #[test]
    fn mode_display() {
        assert_eq!(format!("{}", Mode::default()), "RX");
        assert_eq!(format!("{}", Mode::Transmit), "TX");
    }

    #[test]
    fn tx_outcome_display() {
        assert_eq!(
            format!("{}", TxOutcome::MaxRetransmitsExceeded),
            "MaxRetransmitsExceeded"
        );
    }

    #[test]
    fn status_flags() {
        let flags = StatusFlags::from_bits(0x2E);
        assert!(!flags.rx_dr());
        assert!(flags.tx_ds());
        assert!(!flags.max_rt());
        assert_eq!(flags.rx_pipe(), 7);
        assert!(!flags.tx_full());
        assert_eq!(StatusFlags::new().into_bits(), 0x70);
        let flags = StatusFlags::default().with_rx_dr(true).with_max_rt(true);
        assert_eq!(flags.into_bits(), 0x50);
        assert_eq!(
            format!("{flags}"),
            "StatusFlags rx_dr: true, tx_ds: false, max_rt: true"
        );
    }

    #[test]
    fn fifo_status() {
        let fifo = FifoStatus::from_bits(0x11);
        assert!(fifo.rx_empty());
        assert!(fifo.tx_empty());
        assert!(!fifo.rx_full());
        let fifo = FifoStatus::from_bits(0x22);
        assert!(!fifo.rx_empty());
        assert!(fifo.rx_full());
        assert!(fifo.tx_full());
    }

    #[test]
    fn payload_truncates() {
        let payload = Payload::new(&[0xAA; 40]);
        assert_eq!(payload.len(), 32);
        let payload = Payload::new(&[1, 2, 3]);
        assert_eq!(&payload[..], &[1, 2, 3]);
        assert!(!payload.is_empty());
    }
}
