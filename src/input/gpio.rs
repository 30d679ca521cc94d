//! Raspberry Pi GPIO button via rppal

use rppal::gpio::{Gpio, InputPin};
use tracing::{debug, info};

use super::{ButtonInput, InputError};

/// Button on a BCM-numbered pin, read active-high with no internal pull.
pub struct GpioButton {
    pin: InputPin,
}

impl GpioButton {
    pub fn open(bcm_pin: u8) -> Result<Self, InputError> {
        let pin = Gpio::new()?.get(bcm_pin)?.into_input();
        info!(pin = bcm_pin, "Button input ready");
        Ok(Self { pin })
    }
}

impl ButtonInput for GpioButton {
    fn is_pressed(&mut self) -> Result<bool, InputError> {
        Ok(self.pin.is_high())
    }
}

impl Drop for GpioButton {
    // InputPin restores the pin's previous mode when it drops right after this
    fn drop(&mut self) {
        debug!(pin = self.pin.pin(), "Releasing button input");
    }
}
