//! Renders a classified state on the indicator, the display and the buzzer.

use core::fmt::Debug;

use embedded_hal::delay::DelayNs;

use crate::{
    consts,
    state::{IndicatorColor, NetworkState},
    tone::{PwmSlice, ToneGenerator},
};

/// One on/off output line. Writes cannot fail on the supported boards.
pub trait OutputLine {
    fn set_on(&mut self, on: bool);
}

/// Tri-color status lamp.
pub trait Indicator {
    fn show(&mut self, color: IndicatorColor);
}

/// Indicator built from three independent output lines.
pub struct RgbIndicator<R, G, B> {
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> RgbIndicator<R, G, B>
where
    R: OutputLine,
    G: OutputLine,
    B: OutputLine,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        Self { red, green, blue }
    }
}

impl<R, G, B> Indicator for RgbIndicator<R, G, B>
where
    R: OutputLine,
    G: OutputLine,
    B: OutputLine,
{
    fn show(&mut self, color: IndicatorColor) {
        self.red.set_on(color.red);
        self.green.set_on(color.green);
        self.blue.set_on(color.blue);
    }
}

/// Bitmap text display with a persistent frame buffer.
///
/// `draw_text` and `clear` only touch the buffer; nothing reaches the panel
/// until `flush`.
pub trait TextDisplay {
    type Error: Debug;

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error>;

    fn clear(&mut self) -> Result<(), Self::Error>;
}

/// Owns the indicator and the display buffer. It keeps no record of what it
/// showed last; every call renders the state it is given from scratch.
pub struct Annunciator<I, T> {
    indicator: I,
    display: T,
}

impl<I, T> Annunciator<I, T>
where
    I: Indicator,
    T: TextDisplay,
{
    pub fn new(indicator: I, display: T) -> Self {
        Self { indicator, display }
    }

    /// Lamp off, blank panel. Runs once before the first tick.
    pub fn power_on(&mut self) {
        self.indicator.show(IndicatorColor::OFF);

        let result = self.display.clear().and_then(|()| self.display.flush());
        if let Err(e) = result {
            log::warn!("Display blanking failed: {:?}", e);
        }
        log::info!("Annunciator ready");
    }

    /// Renders `state` on every channel. For `Dangerous` this plays the
    /// alert tone and the pause after it, blocking for about a second;
    /// every other state returns immediately.
    pub fn annunciate<P, D>(&mut self, state: NetworkState, tones: &mut ToneGenerator<P>, delay: &mut D)
    where
        P: PwmSlice,
        D: DelayNs,
    {
        log::trace!("Annunciating {}", state);

        self.indicator.show(state.indicator_color());

        if let Err(e) = self.render_message(state) {
            log::warn!("Display update for {} failed: {:?}", state, e);
        }

        if let Some(alert) = state.alert() {
            log::debug!("Alert tone {}Hz for {}ms", alert.frequency_hz, alert.duration_ms);
            tones.play(alert, consts::ALERT_VOLUME, delay);
            tones.rest(consts::ALERT_PAUSE_MS, delay);
        }
    }

    fn render_message(&mut self, state: NetworkState) -> Result<(), T::Error> {
        for line in state.message().lines() {
            self.display.draw_text(consts::TEXT_X, line.y, line.text)?;
        }
        self.display.flush()
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn display(&self) -> &T {
        &self.display
    }
}
