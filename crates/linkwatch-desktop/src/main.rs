use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use linkwatch_core::engine::Engine;
use linkwatch_core::input::InputSampler;
use log::LevelFilter;

mod buzzer;
mod mock_hw_tui;
mod sim_window;

use buzzer::SimulatedPwm;
use mock_hw_tui::{MockHwTui, Signal};
use sim_window::{PanelLamp, SimWindow, SimulatedLine, SimulatedOled};

/// Blocking delay on the host clock.
struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> anyhow::Result<()> {
    let tui = MockHwTui::new(LevelFilter::Debug)?;
    let panel = tui.handle();
    log::info!("linkwatch desktop simulator starting...");

    let window = SimWindow::new();

    let signals = InputSampler::new(
        SimulatedLine::new(Signal::A, window.clone(), panel.clone()),
        SimulatedLine::new(Signal::B, window.clone(), panel.clone()),
    );
    let indicator = PanelLamp::new(panel.clone());
    let display = SimulatedOled::new(window.clone());
    let buzzer = SimulatedPwm::new(panel.clone());

    // power-on flushes the blank frame, which opens the window
    let mut engine = Engine::new(signals, indicator, display, buzzer, StdDelay);

    engine.run_while(|| {
        let mut window = window.borrow_mut();
        window.pump_events();
        if window.closed() {
            panel.request_quit();
        }
        !panel.quit_requested()
    });

    engine.play_closing_melody();
    log::info!("linkwatch desktop simulator stopped");

    Ok(())
}
