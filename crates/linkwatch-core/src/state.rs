//! Classification of the sampled link signals and the per-state rendering
//! tables (indicator color, display text, alert tone).

use core::fmt;

use crate::{consts, input::RawInputs, tone::ToneSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetworkState {
    /// Both signals active.
    Unstable,
    /// Only signal A active.
    Stable,
    /// Only signal B active.
    Dangerous,
    /// Neither signal active.
    Stabilizing,
}

/// Maps one sampled input pair to its state. Total over all four pairs.
pub fn classify(inputs: RawInputs) -> NetworkState {
    match (inputs.signal_a, inputs.signal_b) {
        (true, true) => NetworkState::Unstable,
        (true, false) => NetworkState::Stable,
        (false, true) => NetworkState::Dangerous,
        (false, false) => NetworkState::Stabilizing,
    }
}

impl NetworkState {
    pub const ALL: [NetworkState; 4] = [
        NetworkState::Unstable,
        NetworkState::Stable,
        NetworkState::Dangerous,
        NetworkState::Stabilizing,
    ];

    pub fn from_inputs(inputs: RawInputs) -> Self {
        classify(inputs)
    }

    pub fn indicator_color(self) -> IndicatorColor {
        match self {
            NetworkState::Unstable => IndicatorColor::new(true, true, false),
            NetworkState::Stable => IndicatorColor::GREEN,
            NetworkState::Dangerous => IndicatorColor::RED,
            NetworkState::Stabilizing => IndicatorColor::BLUE,
        }
    }

    pub fn message(self) -> DisplayMessage {
        // Padding is part of the text: shorter lines leave the tail of the
        // previous message on screen, exactly like the panel firmware does.
        let (first, second) = match self {
            NetworkState::Unstable => ("Instabilidade  ", "  de Rede      "),
            NetworkState::Stable => ("      Rede             ", "    Estavel "),
            NetworkState::Dangerous => ("Rede em Estado  ", "   Perigoso   "),
            NetworkState::Stabilizing => ("Estabilizando ", "   a Rede      "),
        };
        DisplayMessage::two_lines(first, second)
    }

    /// Tone played after rendering, if any. Only `Dangerous` makes sound.
    pub fn alert(self) -> Option<ToneSpec> {
        match self {
            NetworkState::Dangerous => Some(ToneSpec::new(
                consts::ALERT_FREQUENCY_HZ,
                consts::ALERT_DURATION_MS,
            )),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NetworkState::Unstable => "unstable",
            NetworkState::Stable => "stable",
            NetworkState::Dangerous => "dangerous",
            NetworkState::Stabilizing => "stabilizing",
        }
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// On/off state of the three indicator channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorColor {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl IndicatorColor {
    pub const OFF: Self = Self::new(false, false, false);
    pub const RED: Self = Self::new(true, false, false);
    pub const GREEN: Self = Self::new(false, true, false);
    pub const BLUE: Self = Self::new(false, false, true);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLine {
    pub y: i32,
    pub text: &'static str,
}

/// Text lines of one state, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMessage {
    lines: [TextLine; 2],
}

impl DisplayMessage {
    fn two_lines(first: &'static str, second: &'static str) -> Self {
        Self {
            lines: [
                TextLine { y: 0, text: first },
                TextLine {
                    y: consts::LINE_SPACING,
                    text: second,
                },
            ],
        }
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }
}
