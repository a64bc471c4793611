/// The fixed payload capacity of the nRF24L01 FIFOs.
pub const PAYLOAD_WIDTH: usize = 32;

/// The largest frame ever exchanged: one command byte and a full payload.
pub const MAX_FRAME_LEN: usize = PAYLOAD_WIDTH + 1;

/// The largest address (in bytes) the radio accepts.
pub const MAX_ADDRESS_LEN: usize = 5;

/// A private module encapsulating register offsets for the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    pub const RPD: u8 = 0x09;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const RX_ADDR_P2: u8 = 0x0C;
    pub const RX_ADDR_P3: u8 = 0x0D;
    pub const RX_ADDR_P4: u8 = 0x0E;
    pub const RX_ADDR_P5: u8 = 0x0F;
    pub const TX_ADDR: u8 = 0x10;
    pub const RX_PW_P0: u8 = 0x11;
    pub const RX_PW_P1: u8 = 0x12;
    pub const RX_PW_P2: u8 = 0x13;
    pub const RX_PW_P3: u8 = 0x14;
    pub const RX_PW_P4: u8 = 0x15;
    pub const RX_PW_P5: u8 = 0x16;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;

    /// Register addresses only span the low 5 bits of a command byte.
    pub const MASK: u8 = 0x1F;
}

/// A private module encapsulating SPI commands for the nRF24L01.
pub mod commands {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// A private module to encapsulate bit mnemonics
pub mod mnemonics {
    pub const MASK_RX_DR: u8 = 1 << 6;
    pub const MASK_TX_DS: u8 = 1 << 5;
    pub const MASK_MAX_RT: u8 = 1 << 4;
    pub const RX_EMPTY: u8 = 1;
    /// Both RX pipes 0 and 1 enabled.
    pub const EN_RXADDR_P0_P1: u8 = 0x03;
}

/// Fixed delays used by the packet and init sequences.
pub mod timing {
    /// How long CE is held high to fire a transmission (at least 10 us).
    pub const CE_PULSE_US: u32 = 150;
    /// How long to wait after the CE pulse before polling STATUS.
    pub const TX_SETTLE_US: u32 = 1_200;
    /// How long to wait after setting PWR_UP.
    pub const POWER_UP_SETTLE_MS: u32 = 5;
    /// How long to wait after CE is first raised in RX mode.
    pub const STARTUP_SETTLE_MS: u32 = 5;
}
