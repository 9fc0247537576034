//! Buzzer on a dedicated LEDC timer/channel pair.
//!
//! The timer runs at 12-bit resolution so one PWM period is exactly
//! `RESOLUTION_STEPS` counts and duty levels from the core map 1:1 onto
//! LEDC duty values. LEDC derives its own clock divider from a target
//! frequency, so the core's divider is converted back to the frequency it
//! produces before being handed to the timer.

use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, LowSpeed, Resolution};
use esp_idf_hal::prelude::*;
use esp_idf_svc::sys::EspError;
use linkwatch_core::consts;
use linkwatch_core::tone::{ClockDivider, PwmSlice};

use super::BuzzerPeripherals;

/// LEDC low-speed timers are clocked from APB.
const LEDC_CLOCK_HZ: u32 = 80_000_000;

pub struct LedcBuzzer<'d> {
    timer: LedcTimerDriver<'d, LowSpeed>,
    channel: LedcDriver<'d>,
    max_duty: u32,
}

impl<'d> LedcBuzzer<'d> {
    pub fn new(peripherals: BuzzerPeripherals) -> Result<Self, EspError> {
        log::info!("Initializing buzzer PWM...");

        let timer = LedcTimerDriver::new(
            peripherals.timer,
            &TimerConfig::new()
                .frequency(consts::IDLE_FREQUENCY_HZ.Hz().into())
                .resolution(Resolution::Bits12),
        )?;

        let mut channel = LedcDriver::new(peripherals.channel, &timer, peripherals.pin)?;
        channel.set_duty(0)?;

        let max_duty = channel.get_max_duty();
        log::info!("Buzzer PWM initialized (12-bit, max duty: {})", max_duty);

        Ok(Self {
            timer,
            channel,
            max_duty,
        })
    }
}

impl PwmSlice for LedcBuzzer<'_> {
    fn clock_hz(&self) -> u32 {
        LEDC_CLOCK_HZ
    }

    fn set_divider(&mut self, divider: ClockDivider) {
        let frequency_hz = divider.output_hz(LEDC_CLOCK_HZ);
        if let Err(e) = self.timer.set_frequency(Hertz(frequency_hz)) {
            log::warn!("Buzzer: cannot retune to {}Hz: {:?}", frequency_hz, e);
        }
    }

    fn set_level(&mut self, level: u16) {
        let duty = u32::from(level).min(self.max_duty);
        if let Err(e) = self.channel.set_duty(duty) {
            log::warn!("Buzzer: duty {} rejected: {:?}", duty, e);
        }
    }
}
