use embedded_hal::delay::DelayNs;

use crate::{
    consts,
    tone::{PwmSlice, ToneGenerator, ToneSpec},
};

const CLOSING_FREQUENCIES_HZ: [u32; 6] = [1200, 1400, 1600, 1800, 2000, 2200];
const CLOSING_DURATIONS_MS: [u32; 6] = [180, 180, 180, 180, 180, 180];

pub type MelodyTable = heapless::Vec<ToneSpec, 8>;

/// Rising six-note flourish played once when the annunciator shuts down.
pub fn closing_melody() -> MelodyTable {
    let mut notes = MelodyTable::new();
    for (&frequency_hz, &duration_ms) in CLOSING_FREQUENCIES_HZ.iter().zip(CLOSING_DURATIONS_MS.iter()) {
        // capacity 8 holds all six notes
        let _ = notes.push(ToneSpec::new(frequency_hz, duration_ms));
    }
    notes
}

/// Plays each note in order with a fixed gap after it. Blocks for the sum of
/// all durations plus one gap per note.
pub fn play_melody<P, D>(tones: &mut ToneGenerator<P>, delay: &mut D, melody: &[ToneSpec])
where
    P: PwmSlice,
    D: DelayNs,
{
    for note in melody {
        tones.play(*note, consts::ALERT_VOLUME, delay);
        tones.rest(consts::MELODY_GAP_MS, delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{Event, Journal, RecordingDelay, RecordingPwm, TEST_CLOCK_HZ},
        tone::ClockDivider,
    };

    #[test]
    fn test_closing_melody_table() {
        let melody = closing_melody();
        let frequencies: Vec<u32> = melody.iter().map(|n| n.frequency_hz).collect();

        assert_eq!(frequencies, vec![1200, 1400, 1600, 1800, 2000, 2200]);
        assert!(melody.iter().all(|n| n.duration_ms == 180));
    }

    #[test]
    fn test_play_melody_order_and_gaps() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        play_melody(&mut tones, &mut delay, &closing_melody());

        let events = journal.take();
        let expected: Vec<Event> = [1200, 1400, 1600, 1800, 2000, 2200]
            .into_iter()
            .flat_map(|frequency_hz| {
                [
                    Event::Divider(ClockDivider::for_frequency(TEST_CLOCK_HZ, frequency_hz)),
                    Event::Level(1024),
                    Event::Delay(180),
                    Event::Level(0),
                    Event::Delay(50),
                ]
            })
            .collect();
        assert_eq!(events, expected);
    }

    #[test]
    fn test_empty_melody_is_silent() {
        let journal = Journal::default();
        let mut tones = ToneGenerator::new(RecordingPwm::new(&journal));
        let mut delay = RecordingDelay::new(&journal);
        journal.take();

        play_melody(&mut tones, &mut delay, &[]);

        assert!(journal.take().is_empty());
    }
}
