mod buzzer;
mod display_driver;
mod indicator;
mod signal_lines;

pub use buzzer::LedcBuzzer;
pub use display_driver::Oled;
pub use indicator::LampLine;
pub use signal_lines::SignalLine;

use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin};
use esp_idf_hal::i2c::I2C0;
use esp_idf_hal::ledc::{CHANNEL0, TIMER0};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::sys::EspError;

pub struct SystemPeripherals {
    pub buzzer: BuzzerPeripherals,
    pub display: DisplayI2cPeripherals,
    pub indicator: IndicatorPeripherals,
    pub signals: SignalPeripherals,
}

/// Link signal inputs.
/// Active low, internal pull-ups enabled by the driver.
pub struct SignalPeripherals {
    pub line_a: AnyIOPin, // GPIO15
    pub line_b: AnyIOPin, // GPIO7
}

pub struct IndicatorPeripherals {
    pub red: AnyOutputPin,   // GPIO13
    pub green: AnyOutputPin, // GPIO11
    pub blue: AnyOutputPin,  // GPIO12
}

/// LEDC timer and channel dedicated to the buzzer
pub struct BuzzerPeripherals {
    pub timer: TIMER0,
    pub channel: CHANNEL0,
    pub pin: AnyOutputPin, // GPIO9
}

/// SSD1306 on the I2C0 bus
pub struct DisplayI2cPeripherals {
    pub i2c: I2C0,
    pub sda: AnyIOPin, // GPIO35
    pub scl: AnyIOPin, // GPIO36
}

impl SystemPeripherals {
    pub fn take() -> Result<Self, EspError> {
        let peripherals = Peripherals::take()?;

        Ok(SystemPeripherals {
            buzzer: BuzzerPeripherals {
                timer: peripherals.ledc.timer0,
                channel: peripherals.ledc.channel0,
                pin: peripherals.pins.gpio9.into(),
            },
            display: DisplayI2cPeripherals {
                i2c: peripherals.i2c0,
                sda: peripherals.pins.gpio35.into(),
                scl: peripherals.pins.gpio36.into(),
            },
            indicator: IndicatorPeripherals {
                red: peripherals.pins.gpio13.into(),
                green: peripherals.pins.gpio11.into(),
                blue: peripherals.pins.gpio12.into(),
            },
            signals: SignalPeripherals {
                line_a: peripherals.pins.gpio15.into(),
                line_b: peripherals.pins.gpio7.into(),
            },
        })
    }
}
