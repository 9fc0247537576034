use embedded_hal::delay::DelayNs;

use crate::{
    annunciator::{Annunciator, Indicator, TextDisplay},
    consts,
    input::SignalSource,
    melody,
    state::{self, NetworkState},
    tone::{PwmSlice, ToneGenerator},
};

/// The polling loop: sample, classify, annunciate, wait, forever.
///
/// Owns every peripheral handle. Nothing survives from one tick to the next
/// apart from what the display buffer itself retains.
pub struct Engine<S, I, T, P, D> {
    signals: S,
    annunciator: Annunciator<I, T>,
    tones: ToneGenerator<P>,
    delay: D,
}

impl<S, I, T, P, D> Engine<S, I, T, P, D>
where
    S: SignalSource,
    I: Indicator,
    T: TextDisplay,
    P: PwmSlice,
    D: DelayNs,
{
    /// Takes ownership of the peripherals and puts the outputs in their
    /// power-on state.
    pub fn new(signals: S, indicator: I, display: T, pwm: P, delay: D) -> Self {
        let tones = ToneGenerator::new(pwm);
        let mut annunciator = Annunciator::new(indicator, display);
        annunciator.power_on();

        Self {
            signals,
            annunciator,
            tones,
            delay,
        }
    }

    /// One full iteration. Blocks for the tick delay plus whatever the
    /// annunciation of the sampled state blocks for.
    pub fn tick(&mut self) -> NetworkState {
        let inputs = self.signals.sample();
        let state = state::classify(inputs);
        log::trace!("a={} b={} -> {}", inputs.signal_a, inputs.signal_b, state);

        self.annunciator
            .annunciate(state, &mut self.tones, &mut self.delay);
        self.delay.delay_ms(consts::TICK_DELAY_MS);

        state
    }

    pub fn run(&mut self) -> ! {
        log::info!("Entering polling loop ({}ms tick)", consts::TICK_DELAY_MS);
        loop {
            self.tick();
        }
    }

    /// Ticks until `keep_running` returns false. Checked before every tick.
    pub fn run_while<F>(&mut self, mut keep_running: F)
    where
        F: FnMut() -> bool,
    {
        while keep_running() {
            self.tick();
        }
    }

    pub fn play_closing_melody(&mut self) {
        log::info!("Playing closing melody");
        melody::play_melody(&mut self.tones, &mut self.delay, &melody::closing_melody());
    }

    pub fn signals_mut(&mut self) -> &mut S {
        &mut self.signals
    }

    pub fn annunciator(&self) -> &Annunciator<I, T> {
        &self.annunciator
    }
}
