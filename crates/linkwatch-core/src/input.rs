/// Electrical level of one digital input line.
///
/// Platforms implement this for their GPIO type. A GPIO read cannot fail
/// on the supported boards, so there is no error path.
pub trait DigitalLine {
    fn is_low(&mut self) -> bool;
}

/// Anything that can produce one input pair per tick.
pub trait SignalSource {
    fn sample(&mut self) -> RawInputs;
}

/// Logical state of the two link signals, `true` meaning active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    pub signal_a: bool,
    pub signal_b: bool,
}

/// Reads both signal lines once per call.
///
/// Lines are wired with pull-ups, so an active signal reads low.
pub struct InputSampler<A, B> {
    line_a: A,
    line_b: B,
}

impl<A, B> InputSampler<A, B>
where
    A: DigitalLine,
    B: DigitalLine,
{
    pub fn new(line_a: A, line_b: B) -> Self {
        Self { line_a, line_b }
    }

    pub fn release(self) -> (A, B) {
        (self.line_a, self.line_b)
    }
}

impl<A, B> SignalSource for InputSampler<A, B>
where
    A: DigitalLine,
    B: DigitalLine,
{
    fn sample(&mut self) -> RawInputs {
        RawInputs {
            signal_a: self.line_a.is_low(),
            signal_b: self.line_b.is_low(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl DigitalLine for Level {
        fn is_low(&mut self) -> bool {
            !self.0
        }
    }

    #[test]
    fn test_low_reads_as_active() {
        let mut sampler = InputSampler::new(Level(false), Level(true));
        assert_eq!(
            sampler.sample(),
            RawInputs { signal_a: true, signal_b: false }
        );
    }

    #[test]
    fn test_idle_pull_ups_read_inactive() {
        let mut sampler = InputSampler::new(Level(true), Level(true));
        assert_eq!(sampler.sample(), RawInputs::default());
    }

    #[test]
    fn test_sample_has_no_memory() {
        let mut sampler = InputSampler::new(Level(false), Level(false));
        assert_eq!(
            sampler.sample(),
            RawInputs { signal_a: true, signal_b: true }
        );

        let (mut a, mut b) = sampler.release();
        a.0 = true;
        b.0 = true;
        let mut sampler = InputSampler::new(a, b);
        assert_eq!(sampler.sample(), RawInputs::default());
    }
}
