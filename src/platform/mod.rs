//! Platform abstraction layer
//!
//! Input arrives through `InputSource`, polled once per tick. Hosts with a
//! real keyboard or touch screen implement it themselves; the sources here
//! drive headless runs and tests.

use crate::sim::TickInput;

/// Polled once per simulation tick
pub trait InputSource {
    fn poll(&mut self, tick: u64) -> TickInput;
}

/// Never presses anything
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleInput;

impl InputSource for IdleInput {
    fn poll(&mut self, _tick: u64) -> TickInput {
        TickInput::default()
    }
}

/// Presses the button on an explicit list of ticks
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    /// Ticks to press on, ascending
    presses: Vec<u64>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(mut presses: Vec<u64>) -> Self {
        presses.sort_unstable();
        presses.dedup();
        Self { presses, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, tick: u64) -> TickInput {
        while self.cursor < self.presses.len() && self.presses[self.cursor] < tick {
            self.cursor += 1;
        }
        let jump = self.presses.get(self.cursor) == Some(&tick);
        TickInput { jump }
    }
}

/// Presses the button every `period` ticks starting at `first`
#[derive(Debug, Clone, Copy)]
pub struct CadenceInput {
    pub first: u64,
    pub period: u64,
}

impl InputSource for CadenceInput {
    fn poll(&mut self, tick: u64) -> TickInput {
        let jump = tick >= self.first && self.period > 0 && (tick - self.first) % self.period == 0;
        TickInput { jump }
    }
}
