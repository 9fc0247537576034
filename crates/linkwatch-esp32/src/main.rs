use anyhow::Context as _;
use esp_idf_hal::delay::FreeRtos;
use linkwatch_core::annunciator::RgbIndicator;
use linkwatch_core::engine::Engine;
use linkwatch_core::input::InputSampler;

mod peripherals;

use peripherals::{LampLine, LedcBuzzer, Oled, SignalLine, SystemPeripherals};

fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise, some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("linkwatch ESP32 starting...");

    let peripherals = SystemPeripherals::take().context("peripherals already taken")?;

    let signals = InputSampler::new(
        SignalLine::new(peripherals.signals.line_a).context("signal line A")?,
        SignalLine::new(peripherals.signals.line_b).context("signal line B")?,
    );

    let indicator = RgbIndicator::new(
        LampLine::new(peripherals.indicator.red).context("indicator red")?,
        LampLine::new(peripherals.indicator.green).context("indicator green")?,
        LampLine::new(peripherals.indicator.blue).context("indicator blue")?,
    );

    let display = Oled::new(peripherals.display).context("display")?;
    let buzzer = LedcBuzzer::new(peripherals.buzzer).context("buzzer PWM")?;

    // FreeRtos delays yield to the scheduler and keep the idle task running
    let mut engine = Engine::new(signals, indicator, display, buzzer, FreeRtos);
    log::info!("Engine initialized");

    engine.run()
}
