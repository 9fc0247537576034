use std::time::Duration;

use linkwatch_core::consts;
use linkwatch_core::tone::{ClockDivider, PwmSlice};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use crate::mock_hw_tui::PanelHandle;

/// Clock the simulated PWM slice pretends to run from.
pub const SIM_CLOCK_HZ: u32 = 125_000_000;

const SAMPLE_RATE: u32 = 48_000;
const AMPLITUDE: f32 = 0.15;

// Endless PWM-like square wave: high for `duty` of every cycle
struct SquareWave {
    frequency: f32,
    duty: f32,
    sample_rate: u32,
    current_sample: u64,
}

impl SquareWave {
    fn new(frequency: f32, duty: f32, sample_rate: u32) -> Self {
        Self {
            frequency,
            duty,
            sample_rate,
            current_sample: 0,
        }
    }
}

impl Iterator for SquareWave {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample_position = self.current_sample as f32 / self.sample_rate as f32;
        let cycle_position = (sample_position * self.frequency) % 1.0;

        self.current_sample = self.current_sample.wrapping_add(1);

        if cycle_position < self.duty {
            Some(AMPLITUDE)
        } else {
            Some(-AMPLITUDE)
        }
    }
}

impl Source for SquareWave {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// PWM slice played through the default audio device.
///
/// The output is a square wave at the frequency the divider produces,
/// audible for as long as the level is non-zero. Without an audio device it
/// still tracks its state on the panel.
pub struct SimulatedPwm {
    // must outlive every sink created from `handle`
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    frequency_hz: u32,
    panel: PanelHandle,
}

impl SimulatedPwm {
    pub fn new(panel: PanelHandle) -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(e) => {
                log::warn!("No audio output, buzzer is silent: {}", e);
                (None, None)
            }
        };

        Self {
            _stream: stream,
            handle,
            sink: None,
            frequency_hz: 0,
            panel,
        }
    }

    fn start(&mut self, level: u16) {
        let Some(handle) = &self.handle else {
            return;
        };

        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::warn!("Failed to open buzzer sink: {}", e);
                return;
            }
        };

        let duty = f32::from(level) / consts::RESOLUTION_STEPS as f32;
        sink.append(SquareWave::new(self.frequency_hz as f32, duty, SAMPLE_RATE));
        self.sink = Some(sink);
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}

impl PwmSlice for SimulatedPwm {
    fn clock_hz(&self) -> u32 {
        SIM_CLOCK_HZ
    }

    fn set_divider(&mut self, divider: ClockDivider) {
        self.frequency_hz = divider.output_hz(SIM_CLOCK_HZ);
    }

    fn set_level(&mut self, level: u16) {
        self.stop();

        if level == 0 {
            self.panel.set_tone(None);
            return;
        }

        self.panel.set_tone(Some((self.frequency_hz, level)));
        self.start(level);
    }
}
