//! Link signal inputs.
//!
//! Both lines are plain GPIO inputs with the internal pull-up enabled, so an
//! idle line reads high and an asserted one reads low. There is no
//! debouncing here; the polling loop samples each line once per tick.

use esp_idf_hal::gpio::{AnyIOPin, Input, PinDriver, Pull};
use esp_idf_svc::sys::EspError;
use linkwatch_core::input::DigitalLine;

pub struct SignalLine<'a> {
    pin: PinDriver<'a, AnyIOPin, Input>,
}

impl<'a> SignalLine<'a> {
    /// Configures `pin` as an input with pull-up.
    pub fn new(pin: AnyIOPin) -> Result<Self, EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;

        log::info!("Signal line on GPIO{} configured (pull-up)", pin.pin());

        Ok(Self { pin })
    }
}

impl DigitalLine for SignalLine<'_> {
    fn is_low(&mut self) -> bool {
        self.pin.is_low()
    }
}
