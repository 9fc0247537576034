use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::prelude::*;
use display_interface::DisplayError;
use linkwatch_core::annunciator::TextDisplay;
use linkwatch_core::gfx;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use super::DisplayI2cPeripherals;

pub const BUS_FREQUENCY_KHZ: u32 = 400;

type Panel<'d> = Ssd1306<
    I2CInterface<I2cDriver<'d>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// 128x64 SSD1306 driven from a RAM frame buffer.
///
/// Drawing only touches the buffer; `flush` pushes the whole buffer over I2C.
pub struct Oled<'d> {
    panel: Panel<'d>,
}

impl<'d> Oled<'d> {
    pub fn new(peripherals: DisplayI2cPeripherals) -> anyhow::Result<Self> {
        log::info!("Configuring I2C at {} kHz...", BUS_FREQUENCY_KHZ);

        let config = I2cConfig::new().baudrate(BUS_FREQUENCY_KHZ.kHz().into());
        let i2c = I2cDriver::new(peripherals.i2c, peripherals.sda, peripherals.scl, &config)?;

        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        panel
            .init()
            .map_err(|e| anyhow::anyhow!("SSD1306 init failed: {:?}", e))?;

        log::info!("Display initialized");

        Ok(Self { panel })
    }
}

impl TextDisplay for Oled<'_> {
    type Error = DisplayError;

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        gfx::draw_text(&mut self.panel, x, y, text)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.panel.flush()
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        gfx::clear(&mut self.panel)
    }
}
