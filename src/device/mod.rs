mod epd2in13_v3;

pub use epd2in13_v3::EPD_2IN13_V3;

/// Board-specific parameters for the panel and its touch controller.
#[derive(Debug, Clone, Copy)]
pub struct PanelProfile {
    pub name: &'static str,

    // E-paper resolution in pixels
    pub width: u16,
    pub height: u16,

    // Touch controller ranges (inclusive)
    pub touch_x_max: u16,
    pub touch_y_max: u16,
    pub touch_size_max: u16,

    // Touch controller wiring
    pub touch_i2c_address: u16,
    pub gpio_chip: &'static str,
    pub int_line: u32,
    pub trst_line: u32,

    // Default evdev node the kernel goodix driver exposes
    pub touch_device: &'static str,
}

impl PanelProfile {
    /// Profile for the board this binary targets.
    pub fn current() -> &'static Self {
        &EPD_2IN13_V3
    }

    /// Clamp a raw controller reading into the panel's touch range.
    pub fn clamp_touch(&self, x: i32, y: i32, size: i32) -> (u16, u16, u16) {
        (
            x.clamp(0, self.touch_x_max as i32) as u16,
            y.clamp(0, self.touch_y_max as i32) as u16,
            size.clamp(0, self.touch_size_max as i32) as u16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_readings_into_range() {
        let p = PanelProfile::current();
        assert_eq!(p.clamp_touch(-5, 10, 3), (0, 10, 3));
        assert_eq!(
            p.clamp_touch(10_000, 10_000, 100_000),
            (p.touch_x_max, p.touch_y_max, p.touch_size_max)
        );
    }
}
