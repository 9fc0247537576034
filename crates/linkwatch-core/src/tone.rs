//! Square-wave tone timing: frequency to PWM divider mapping and blocking
//! tone playback.
//!
//! The PWM counter wraps every [`consts::RESOLUTION_STEPS`] input clocks, so
//! the output frequency is `clock_hz / (divider * RESOLUTION_STEPS)`. The
//! divider is an 8.4 fixed-point value, which bounds how closely a requested
//! frequency can be reproduced.

use embedded_hal::delay::DelayNs;

use crate::consts;

/// Platform-agnostic PWM slice driving the buzzer.
pub trait PwmSlice {
    /// Base clock feeding the divider.
    fn clock_hz(&self) -> u32;

    fn set_divider(&mut self, divider: ClockDivider);

    /// Duty level out of `RESOLUTION_STEPS`. 0 is silence.
    fn set_level(&mut self, level: u16);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneSpec {
    pub frequency_hz: u32,
    pub duration_ms: u32,
}

impl ToneSpec {
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }

    /// A zero frequency is a rest: silence for the duration.
    pub const fn is_rest(&self) -> bool {
        self.frequency_hz == 0
    }
}

/// Clock divider in 8.4 fixed point (integer part 1..=255, 4 fraction bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockDivider {
    sixteenths: u16,
}

impl ClockDivider {
    pub const MIN: Self = Self { sixteenths: 0x010 };
    pub const MAX: Self = Self { sixteenths: 0xfff };

    /// Divider that brings `clock_hz` closest to `frequency_hz`, saturating
    /// at the ends of the representable range. A zero frequency maps to
    /// [`ClockDivider::MAX`].
    pub fn for_frequency(clock_hz: u32, frequency_hz: u32) -> Self {
        let denominator = u64::from(frequency_hz) * u64::from(consts::RESOLUTION_STEPS);
        if denominator == 0 {
            return Self::MAX;
        }

        let numerator = u64::from(clock_hz) * 16;
        let sixteenths = (numerator + denominator / 2) / denominator;
        let clamped = sixteenths.clamp(
            u64::from(Self::MIN.sixteenths),
            u64::from(Self::MAX.sixteenths),
        );

        Self {
            // clamped to 0xfff above
            sixteenths: clamped as u16,
        }
    }

    pub fn integer(&self) -> u8 {
        (self.sixteenths >> 4) as u8
    }

    pub fn fraction(&self) -> u8 {
        (self.sixteenths & 0xf) as u8
    }

    pub fn sixteenths(&self) -> u16 {
        self.sixteenths
    }

    /// Frequency actually produced with this divider.
    pub fn output_hz(&self, clock_hz: u32) -> u32 {
        let numerator = u64::from(clock_hz) * 16;
        let denominator = u64::from(self.sixteenths) * u64::from(consts::RESOLUTION_STEPS);
        (numerator / denominator) as u32
    }
}

/// Owns the buzzer PWM slice. Every playback call blocks the caller through
/// the given delay for the full duration of the sound.
pub struct ToneGenerator<P> {
    pwm: P,
}

impl<P> ToneGenerator<P>
where
    P: PwmSlice,
{
    /// Parks the slice at the idle frequency with the output silent.
    pub fn new(mut pwm: P) -> Self {
        let divider = ClockDivider::for_frequency(pwm.clock_hz(), consts::IDLE_FREQUENCY_HZ);
        pwm.set_divider(divider);
        pwm.set_level(0);
        Self { pwm }
    }

    /// Sounds `frequency_hz` at `volume` (duty out of `RESOLUTION_STEPS`)
    /// for `duration_ms`, then silences the output.
    ///
    /// Blocks for `duration_ms`.
    pub fn play_tone<D>(&mut self, frequency_hz: u32, duration_ms: u32, volume: u16, delay: &mut D)
    where
        D: DelayNs,
    {
        if frequency_hz == 0 {
            self.pwm.set_level(0);
            delay.delay_ms(duration_ms);
            return;
        }

        let clock_hz = self.pwm.clock_hz();
        let divider = ClockDivider::for_frequency(clock_hz, frequency_hz);
        log::trace!(
            "tone {}Hz for {}ms: divider {}.{}/16 -> {}Hz",
            frequency_hz,
            duration_ms,
            divider.integer(),
            divider.fraction(),
            divider.output_hz(clock_hz)
        );

        self.pwm.set_divider(divider);
        self.pwm.set_level(clamp_level(volume));
        delay.delay_ms(duration_ms);
        self.pwm.set_level(0);
    }

    pub fn play<D>(&mut self, tone: ToneSpec, volume: u16, delay: &mut D)
    where
        D: DelayNs,
    {
        self.play_tone(tone.frequency_hz, tone.duration_ms, volume, delay);
    }

    /// Half-scale beep at whatever frequency the slice is currently set to,
    /// followed by a short trailing pause.
    ///
    /// Blocks for `duration_ms + BEEP_TRAILING_PAUSE_MS`.
    pub fn beep<D>(&mut self, duration_ms: u32, delay: &mut D)
    where
        D: DelayNs,
    {
        self.pwm.set_level(consts::BEEP_VOLUME);
        delay.delay_ms(duration_ms);
        self.pwm.set_level(0);
        delay.delay_ms(consts::BEEP_TRAILING_PAUSE_MS);
    }

    /// Silent hold. The output is already off between tones.
    pub fn rest<D>(&mut self, duration_ms: u32, delay: &mut D)
    where
        D: DelayNs,
    {
        delay.delay_ms(duration_ms);
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn release(self) -> P {
        self.pwm
    }
}

fn clamp_level(volume: u16) -> u16 {
    // a level equal to the wrap keeps the output permanently high
    volume.min(consts::RESOLUTION_STEPS as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Event, Journal, RecordingDelay, RecordingPwm, TEST_CLOCK_HZ};

    #[test]
    fn test_divider_for_alert_frequency() {
        let divider = ClockDivider::for_frequency(125_000_000, 1200);
        // 125 MHz / (1200 * 4096) = 25.43
        assert_eq!(divider.integer(), 25);
        assert_eq!(divider.fraction(), 7);

        let produced = divider.output_hz(125_000_000);
        assert!(produced.abs_diff(1200) <= 12, "produced {produced}Hz");
    }

    #[test]
    fn test_divider_is_monotonic() {
        for clock_hz in [80_000_000, 125_000_000] {
            let mut previous = ClockDivider::MAX;
            for frequency_hz in (1..=20_000).step_by(7) {
                let divider = ClockDivider::for_frequency(clock_hz, frequency_hz);
                assert!(
                    divider <= previous,
                    "{frequency_hz}Hz gave {divider:?} after {previous:?}"
                );
                previous = divider;
            }
        }
    }

    #[test]
    fn test_divider_saturates() {
        assert_eq!(ClockDivider::for_frequency(125_000_000, 0), ClockDivider::MAX);
        assert_eq!(ClockDivider::for_frequency(125_000_000, 1), ClockDivider::MAX);
        assert_eq!(ClockDivider::for_frequency(125_000_000, 1_000_000), ClockDivider::MIN);
    }

    #[test]
    fn test_melody_range_is_reproduced_closely() {
        for frequency_hz in [1200, 1400, 1600, 1800, 2000, 2200] {
            let produced = ClockDivider::for_frequency(80_000_000, frequency_hz).output_hz(80_000_000);
            // one sixteenth of a ~10 divider is well under 1 %
            assert!(produced.abs_diff(frequency_hz) * 100 <= frequency_hz, "{frequency_hz}Hz -> {produced}Hz");
        }
    }

    #[test]
    fn test_new_parks_slice_silent() {
        let journal = Journal::default();
        let _tones = ToneGenerator::new(RecordingPwm::new(&journal));

        assert_eq!(
            journal.take(),
            vec![
                Event::Divider(ClockDivider::for_frequency(TEST_CLOCK_HZ, 100)),
                Event::Level(0),
            ]
        );
    }

    #[test]
    fn test_play_tone_sequence() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        tones.play_tone(1200, 500, 1024, &mut delay);

        assert_eq!(
            journal.take(),
            vec![
                Event::Divider(ClockDivider::for_frequency(TEST_CLOCK_HZ, 1200)),
                Event::Level(1024),
                Event::Delay(500),
                Event::Level(0),
            ]
        );
    }

    #[test]
    fn test_volume_is_clamped_to_resolution() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        tones.play_tone(440, 10, u16::MAX, &mut delay);

        assert!(journal.take().contains(&Event::Level(4096)));
    }

    #[test]
    fn test_rest_stays_silent() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        tones.play(ToneSpec::new(0, 180), 1024, &mut delay);

        assert_eq!(journal.take(), vec![Event::Level(0), Event::Delay(180)]);
    }

    #[test]
    fn test_beep_keeps_divider_and_pauses() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        tones.beep(200, &mut delay);

        assert_eq!(
            journal.take(),
            vec![
                Event::Level(2048),
                Event::Delay(200),
                Event::Level(0),
                Event::Delay(100),
            ]
        );
    }
}
