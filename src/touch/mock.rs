//! Scripted touch backend for running the demo without the HAT.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::device::PanelProfile;
use crate::gpio::InterruptPin;

use super::{publish_frame, Contact, TouchController, TouchSample};

/// One scripted contact, in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
    #[serde(default = "default_size")]
    pub size: u16,
}

fn default_size() -> u16 {
    8
}

type Script = Arc<Mutex<VecDeque<TouchPoint>>>;

fn lock(script: &Script) -> io::Result<std::sync::MutexGuard<'_, VecDeque<TouchPoint>>> {
    script
        .lock()
        .map_err(|_| io::Error::other("touch script lock poisoned"))
}

/// Hands out one point per serviced interrupt.
pub struct ScriptedTouch {
    script: Script,
    profile: &'static PanelProfile,
}

/// Low while scripted points are still queued.
pub struct ScriptedPin {
    script: Script,
}

/// Build a controller and its INT line over the same script.
pub fn scripted_pair(points: Vec<TouchPoint>, profile: &'static PanelProfile) -> (ScriptedTouch, ScriptedPin) {
    let script: Script = Arc::new(Mutex::new(points.into()));
    (
        ScriptedTouch {
            script: script.clone(),
            profile,
        },
        ScriptedPin { script },
    )
}

impl TouchController for ScriptedTouch {
    fn init(&mut self) -> io::Result<()> {
        log::info!(
            "Scripted touch controller for {} ({} points queued)",
            self.profile.name,
            lock(&self.script)?.len()
        );
        Ok(())
    }

    fn scan(&mut self, dev: &mut TouchSample, old: &mut TouchSample) -> io::Result<()> {
        if !dev.touch.take() {
            return Ok(());
        }

        let Some(point) = lock(&self.script)?.pop_front() else {
            return Ok(());
        };

        let (x, y, size) = self
            .profile
            .clamp_touch(point.x as i32, point.y as i32, point.size as i32);
        publish_frame(dev, old, &[Contact { track_id: 0, x, y, size }]);
        Ok(())
    }
}

impl InterruptPin for ScriptedPin {
    fn digital_read(&mut self) -> io::Result<u8> {
        Ok(if lock(&self.script)?.is_empty() { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EPD_2IN13_V3;

    fn point(x: u16, y: u16) -> TouchPoint {
        TouchPoint { x, y, size: 4 }
    }

    #[test]
    fn pin_is_low_until_script_drains() {
        let (mut touch, mut pin) = scripted_pair(vec![point(1, 2)], &EPD_2IN13_V3);
        let mut dev = TouchSample::new();
        let mut old = TouchSample::new();

        assert_eq!(pin.digital_read().unwrap(), 0);
        dev.touch.set(true);
        touch.scan(&mut dev, &mut old).unwrap();
        assert_eq!(pin.digital_read().unwrap(), 1);
        assert_eq!((dev.x[0], dev.y[0], dev.s[0]), (1, 2, 4));
    }

    #[test]
    fn scan_waits_for_the_irq() {
        let (mut touch, _pin) = scripted_pair(vec![point(5, 6)], &EPD_2IN13_V3);
        let mut dev = TouchSample::new();
        let mut old = TouchSample::new();

        touch.scan(&mut dev, &mut old).unwrap();
        assert!(!dev.touchpoint_flag);

        dev.touch.set(true);
        touch.scan(&mut dev, &mut old).unwrap();
        assert!(dev.touchpoint_flag);
        assert!(!dev.touch.get());
    }

    #[test]
    fn points_deserialize_with_default_size() {
        #[derive(Deserialize)]
        struct Doc {
            points: Vec<TouchPoint>,
        }

        let doc: Doc = toml::from_str("points = [{ x = 3, y = 4 }, { x = 5, y = 6, size = 1 }]").unwrap();
        assert_eq!(doc.points[0].size, 8);
        assert_eq!(doc.points[1], TouchPoint { x: 5, y: 6, size: 1 });
    }
}
