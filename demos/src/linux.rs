use anyhow::{anyhow, Error, Result};
pub use linux_embedded_hal::{
    gpio_cdev::{chips, Chip, LineRequestFlags},
    spidev::{SpiModeFlags, SpidevOptions},
    CdevPin, Delay, SpidevDevice,
};

use crate::PinSet;

/// The GPIO chip and wiring used to reach a radio.
pub struct BoardHardware {
    gpio: Chip,
    pins: PinSet,
}

impl BoardHardware {
    pub fn new(dev_gpio_chip: u8, pins: PinSet) -> Result<Self> {
        // get the desired "/dev/gpiochip{dev_gpio_chip}"
        let dev_gpio = chips()?
            .find(|chip| {
                if let Ok(chip) = chip {
                    if chip
                        .path()
                        .to_string_lossy()
                        .ends_with(&dev_gpio_chip.to_string())
                    {
                        return true;
                    }
                }
                false
            })
            .ok_or(anyhow!(
                "Could not find specified dev/gpiochip{dev_gpio_chip} for this system."
            ))??;

        Ok(BoardHardware {
            gpio: dev_gpio,
            pins,
        })
    }

    /// Use the default [`PinSet`] on gpiochip4 (RPi5), falling back to gpiochip0.
    #[allow(
        clippy::should_implement_trait,
        reason = "Default trait does not support `-> Result<Self>`"
    )]
    pub fn default() -> Result<Self> {
        let result = Self::new(4, PinSet::default());
        if result.is_err() {
            return Self::new(0, PinSet::default());
        }
        result
    }

    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    /// Open the spidev device wired to this board's CSN, CLK, MOSI and MISO lines.
    pub fn spi_device(&self) -> Result<SpidevDevice> {
        let (bus, cs) = self.pins.spidev()?;
        let mut spi = SpidevDevice::open(format!("/dev/spidev{bus}.{cs}")).map_err(|_| {
            anyhow!("SPI bus {bus} with CS pin option {cs} is not available in this system")
        })?;
        let config = SpidevOptions::new()
            .max_speed_hz(10000000)
            .mode(SpiModeFlags::SPI_MODE_0)
            .bits_per_word(8)
            .build();
        spi.configure(&config).map_err(Error::from)?;
        Ok(spi)
    }

    /// Claim the CE line as an output (initially low).
    pub fn ce_pin(&mut self) -> Result<CdevPin> {
        let ce_pin = self.pins.ce;
        let ce_line = self
            .gpio
            .get_line(ce_pin)
            .map_err(|_| anyhow!("GPIO{ce_pin} is unavailable"))?;
        let ce_line_handle = ce_line
            .request(LineRequestFlags::OUTPUT, 0, "rf24-link")
            .map_err(Error::from)?;
        CdevPin::new(ce_line_handle).map_err(Error::from)
    }
}
