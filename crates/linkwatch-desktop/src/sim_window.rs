//! The simulator window: shows the OLED frame buffer and doubles as the
//! input device for holding the link signals active.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::prelude::Size;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use linkwatch_core::annunciator::{Indicator, TextDisplay};
use linkwatch_core::consts;
use linkwatch_core::gfx;
use linkwatch_core::input::DigitalLine;
use linkwatch_core::state::IndicatorColor;

use crate::mock_hw_tui::{PanelHandle, Signal};

pub struct SimWindow {
    window: Window,
    held_a: bool,
    held_b: bool,
    closed: bool,
}

pub type SharedWindow = Rc<RefCell<SimWindow>>;

impl SimWindow {
    pub fn new() -> SharedWindow {
        let settings = OutputSettingsBuilder::new()
            .theme(BinaryColorTheme::OledBlue)
            .scale(4)
            .pixel_spacing(1)
            .build();
        Rc::new(RefCell::new(Self {
            window: Window::new("linkwatch-desktop", &settings),
            held_a: false,
            held_b: false,
            closed: false,
        }))
    }

    /// Drains pending window events. Only valid once the window has been
    /// shown by a first flush.
    pub fn pump_events(&mut self) {
        for event in self.window.events() {
            match event {
                SimulatorEvent::Quit => {
                    self.closed = true;
                }
                SimulatorEvent::KeyDown { keycode, repeat: false, .. } => match keycode {
                    Keycode::A => self.held_a = true,
                    Keycode::B => self.held_b = true,
                    Keycode::Escape => self.closed = true,
                    _ => (),
                },
                SimulatorEvent::KeyUp { keycode, .. } => match keycode {
                    Keycode::A => self.held_a = false,
                    Keycode::B => self.held_b = false,
                    _ => (),
                },
                _ => (),
            }
        }
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    fn held(&self, signal: Signal) -> bool {
        match signal {
            Signal::A => self.held_a,
            Signal::B => self.held_b,
        }
    }
}

/// Simulated 128x64 panel. The window only changes on flush.
pub struct SimulatedOled {
    display: SimulatorDisplay<consts::ColorType>,
    window: SharedWindow,
}

impl SimulatedOled {
    pub fn new(window: SharedWindow) -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(consts::WIDTH, consts::HEIGHT)),
            window,
        }
    }
}

impl TextDisplay for SimulatedOled {
    type Error = Infallible;

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        gfx::draw_text(&mut self.display, x, y, text)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.window.borrow_mut().window.update(&self.display);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        gfx::clear(&mut self.display)
    }
}

/// A signal is active while its key is held in the window or its latch is
/// set on the panel.
pub struct SimulatedLine {
    signal: Signal,
    window: SharedWindow,
    panel: PanelHandle,
}

impl SimulatedLine {
    pub fn new(signal: Signal, window: SharedWindow, panel: PanelHandle) -> Self {
        Self { signal, window, panel }
    }
}

impl DigitalLine for SimulatedLine {
    fn is_low(&mut self) -> bool {
        self.window.borrow().held(self.signal) || self.panel.signal_latched(self.signal)
    }
}

pub struct PanelLamp {
    panel: PanelHandle,
}

impl PanelLamp {
    pub fn new(panel: PanelHandle) -> Self {
        Self { panel }
    }
}

impl Indicator for PanelLamp {
    fn show(&mut self, color: IndicatorColor) {
        self.panel.set_lamp(color);
    }
}
