use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};
use esp_idf_svc::sys::EspError;
use linkwatch_core::annunciator::OutputLine;

/// One channel of the tri-color lamp, driven high when on.
pub struct LampLine<'a> {
    pin: PinDriver<'a, AnyOutputPin, Output>,
}

impl<'a> LampLine<'a> {
    /// Configures `pin` as an output, starting dark.
    pub fn new(pin: AnyOutputPin) -> Result<Self, EspError> {
        let mut pin = PinDriver::output(pin)?;
        pin.set_low()?;
        Ok(Self { pin })
    }
}

impl OutputLine for LampLine<'_> {
    fn set_on(&mut self, on: bool) {
        if let Err(e) = self.pin.set_level(Level::from(on)) {
            log::warn!("GPIO{} write failed: {:?}", self.pin.pin(), e);
        }
    }
}
