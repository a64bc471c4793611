//! A helper library meant to abstract platform-specific implementation details
//! from demos that are supposed to be platform-agnostic.
#[cfg(target_os = "linux")]
pub mod linux;

use anyhow::{anyhow, Error, Result};
use core::fmt::{Debug, Display, Formatter};

pub fn debug_err(err: impl Debug) -> Error {
    anyhow!("{err:?}")
}

/// The six lines wiring a radio to the board (GPIO numbers).
///
/// CSN, CLK, MOSI and MISO are driven by the SPI peripheral; only CE is
/// toggled by the driver. IRQ is not used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinSet {
    pub ce: u32,
    pub csn: u32,
    pub clk: u32,
    pub mosi: u32,
    pub miso: u32,
    pub irq: u32,
}

impl PinSet {
    /// The usual wiring on a Raspberry Pi (SPI0 with CE0 as CSN).
    pub const RPI_SPI0: PinSet = PinSet {
        ce: 22,
        csn: 8,
        clk: 11,
        mosi: 10,
        miso: 9,
        irq: 24,
    };

    /// Find the spidev `(bus, chip select)` pair that drives this CSN line.
    pub fn spidev(&self) -> Result<(u8, u8)> {
        let bus = match (self.clk, self.mosi, self.miso) {
            (11, 10, 9) => 0,
            (21, 20, 19) => 1,
            (clk, mosi, miso) => {
                return Err(anyhow!(
                    "GPIO{clk}/GPIO{mosi}/GPIO{miso} are not the lines of a known SPI bus"
                ))
            }
        };
        let cs = match (bus, self.csn) {
            (0, 8) | (1, 18) => 0,
            (0, 7) | (1, 17) => 1,
            (1, 16) => 2,
            (_, csn) => return Err(anyhow!("GPIO{csn} is not a CSN line of SPI bus {bus}")),
        };
        Ok((bus, cs))
    }
}

impl Default for PinSet {
    fn default() -> Self {
        Self::RPI_SPI0
    }
}

impl Display for PinSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "CE=GPIO{} CSN=GPIO{} CLK=GPIO{} MOSI=GPIO{} MISO=GPIO{} IRQ=GPIO{}",
            self.ce, self.csn, self.clk, self.mosi, self.miso, self.irq
        )
    }
}
