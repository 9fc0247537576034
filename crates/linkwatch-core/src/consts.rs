use embedded_graphics::pixelcolor::BinaryColor;

/// Pixel format of the status display (SSD1306 class panel).
pub type ColorType = BinaryColor;

pub const WIDTH: u32 = 128;
pub const HEIGHT: u32 = 64;

/// Left edge of every text line.
pub const TEXT_X: i32 = 5;
/// Vertical distance between the top of two consecutive lines.
pub const LINE_SPACING: i32 = 24;

/// Fixed pause at the end of every tick.
pub const TICK_DELAY_MS: u32 = 10;

/// Square-wave resolution: the PWM counter wraps after this many steps and
/// duty levels are expressed out of the same range.
pub const RESOLUTION_STEPS: u32 = 4096;

/// Frequency the buzzer slice is parked at while silent.
pub const IDLE_FREQUENCY_HZ: u32 = 100;

pub const ALERT_FREQUENCY_HZ: u32 = 1200;
pub const ALERT_DURATION_MS: u32 = 500;
pub const ALERT_PAUSE_MS: u32 = 500;
/// 25 % duty.
pub const ALERT_VOLUME: u16 = 1024;

/// 50 % duty.
pub const BEEP_VOLUME: u16 = 2048;
pub const BEEP_TRAILING_PAUSE_MS: u32 = 100;

pub const MELODY_GAP_MS: u32 = 50;
