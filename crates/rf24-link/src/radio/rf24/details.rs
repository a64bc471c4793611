use super::{registers, Nrf24};
use crate::radio::prelude::{RegisterCodec, RegisterDump};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

#[cfg(feature = "std")]
extern crate std;

/// Describes one entry of the [`REGISTER_CATALOG`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterInfo {
    /// The datasheet's name for the register.
    pub name: &'static str,
    /// The register's address.
    pub address: u8,
    /// How many bytes are read from the register.
    pub len: u8,
}

const fn reg(name: &'static str, address: u8, len: u8) -> RegisterInfo {
    RegisterInfo { name, address, len }
}

/// Every register visited by [`RegisterDump::dump_registers()`], in address order.
pub const REGISTER_CATALOG: [RegisterInfo; 26] = [
    reg("CONFIG", registers::CONFIG, 1),
    reg("EN_AA", registers::EN_AA, 1),
    reg("EN_RXADDR", registers::EN_RXADDR, 1),
    reg("SETUP_AW", registers::SETUP_AW, 1),
    reg("SETUP_RETR", registers::SETUP_RETR, 1),
    reg("RF_CH", registers::RF_CH, 1),
    reg("RF_SETUP", registers::RF_SETUP, 1),
    reg("STATUS", registers::STATUS, 1),
    reg("OBSERVE_TX", registers::OBSERVE_TX, 1),
    reg("RPD", registers::RPD, 1),
    reg("RX_ADDR_P0", registers::RX_ADDR_P0, 5),
    reg("RX_ADDR_P1", registers::RX_ADDR_P1, 5),
    reg("RX_ADDR_P2", registers::RX_ADDR_P2, 1),
    reg("RX_ADDR_P3", registers::RX_ADDR_P3, 1),
    reg("RX_ADDR_P4", registers::RX_ADDR_P4, 1),
    reg("RX_ADDR_P5", registers::RX_ADDR_P5, 1),
    reg("TX_ADDR", registers::TX_ADDR, 5),
    reg("RX_PW_P0", registers::RX_PW_P0, 1),
    reg("RX_PW_P1", registers::RX_PW_P1, 1),
    reg("RX_PW_P2", registers::RX_PW_P2, 1),
    reg("RX_PW_P3", registers::RX_PW_P3, 1),
    reg("RX_PW_P4", registers::RX_PW_P4, 1),
    reg("RX_PW_P5", registers::RX_PW_P5, 1),
    reg("FIFO_STATUS", registers::FIFO_STATUS, 1),
    reg("DYNPD", registers::DYNPD, 1),
    reg("FEATURE", registers::FEATURE, 1),
];

impl<SPI, DO, DELAY> RegisterDump for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn dump_registers<F>(&mut self, mut visit: F)
    where
        F: FnMut(&RegisterInfo, Option<&[u8]>),
    {
        for info in REGISTER_CATALOG.iter() {
            match self.read_register(info.address, info.len as usize) {
                Ok(frame) => visit(info, Some(frame.data())),
                Err(_) => {
                    warn!("Failed to read register {=str}", info.name);
                    visit(info, None);
                }
            }
        }
    }

    #[cfg(feature = "std")]
    fn print_details(&mut self) {
        std::println!("Primary Mode______________{}", self._mode);
        std::println!("Payload width_____________{} bytes", self._payload_length);
        std::println!("Last STATUS_______________{}", self._status);
        self.dump_registers(|info, data| match data {
            Some(data) => {
                std::print!("{:<12} (0x{:02X}):", info.name, info.address);
                for byte in data {
                    std::print!(" 0x{byte:02X}");
                }
                std::println!();
            }
            None => std::println!("{:<12} (0x{:02X}): <ERR>", info.name, info.address),
        });
    }

    #[cfg(all(feature = "defmt", not(feature = "std")))]
    fn print_details(&mut self) {
        defmt::println!("Primary Mode______________{}", self._mode);
        defmt::println!("Payload width_____________{=u8} bytes", self._payload_length);
        defmt::println!("Last STATUS_______________{}", self._status);
        self.dump_registers(|info, data| match data {
            Some(data) => defmt::println!(
                "{=str} (0x{=u8:02X}): {=[u8]:#04X}",
                info.name,
                info.address,
                data
            ),
            None => defmt::println!("{=str} (0x{=u8:02X}): <ERR>", info.name, info.address),
        });
    }

    #[cfg(not(any(feature = "defmt", feature = "std")))]
    fn print_details(&mut self) {}
}
