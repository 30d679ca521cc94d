//! Button input sampling and edge detection

#[cfg(feature = "gpio")]
pub mod gpio;

#[cfg(feature = "gpio")]
pub use gpio::GpioButton;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[cfg(feature = "gpio")]
    #[error("GPIO error: {0}")]
    Gpio(#[from] rppal::gpio::Error),

    #[error("input read failed: {0}")]
    Read(String),
}

/// A polled, level-triggered digital input. `true` means pressed.
///
/// Implementors release the underlying resource in `Drop`. The controller
/// takes the input by value, so release happens exactly once however the
/// loop ends.
pub trait ButtonInput {
    fn is_pressed(&mut self) -> Result<bool, InputError>;
}

/// Latched `{previous, current}` pair, updated once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub current: bool,
    pub previous: bool,
}

/// Reports a press only on a low-to-high transition between two samples
#[derive(Debug, Default)]
pub struct EdgeDetector {
    state: ButtonState,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Feed one sample; returns true on a rising edge.
    pub fn update(&mut self, level: bool) -> bool {
        self.state.current = level;
        let rising = self.state.current != self.state.previous && self.state.current;
        self.state.previous = self.state.current;
        rising
    }
}
