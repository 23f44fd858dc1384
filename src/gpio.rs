//! The touch controller's INT line, read as a plain digital input.

use std::io;

use embedded_hal::digital::InputPin;
use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::CdevPin;

const CONSUMER: &str = "epd-touch";

/// `digital_read(pin)`: 0 for low, 1 for high. The INT line is active low.
pub trait InterruptPin: Send {
    fn digital_read(&mut self) -> io::Result<u8>;
}

impl<T: InterruptPin + ?Sized> InterruptPin for Box<T> {
    fn digital_read(&mut self) -> io::Result<u8> {
        (**self).digital_read()
    }
}

/// Any embedded-hal input pin.
pub struct HalInputPin<P>(pub P);

impl<P: InputPin + Send> InterruptPin for HalInputPin<P> {
    fn digital_read(&mut self) -> io::Result<u8> {
        match self.0.is_high() {
            Ok(high) => Ok(high as u8),
            Err(e) => Err(io::Error::other(format!("gpio read failed: {:?}", e))),
        }
    }
}

/// Request `line` on the chip at `path` as an input through the GPIO character device.
pub fn open_cdev_pin(path: &str, line: u32) -> io::Result<HalInputPin<CdevPin>> {
    let mut chip = Chip::new(path).map_err(|e| io::Error::other(format!("{}: {}", path, e)))?;
    let handle = chip
        .get_line(line)
        .and_then(|l| l.request(LineRequestFlags::INPUT, 0, CONSUMER))
        .map_err(|e| io::Error::other(format!("gpio line {}: {}", line, e)))?;
    let pin = CdevPin::new(handle).map_err(|e| io::Error::other(format!("gpio line {}: {}", line, e)))?;
    log::debug!("INT line {} requested as input", line);
    Ok(HalInputPin(pin))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use embedded_hal::digital::ErrorType;

    use super::*;

    struct Level(bool);

    impl ErrorType for Level {
        type Error = Infallible;
    }

    impl InputPin for Level {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[test]
    fn hal_pin_maps_levels_to_bits() {
        assert_eq!(HalInputPin(Level(false)).digital_read().unwrap(), 0);
        assert_eq!(HalInputPin(Level(true)).digital_read().unwrap(), 1);
    }
}
