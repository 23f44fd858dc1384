//! GT1151 touch backend on top of the kernel goodix driver's evdev node.
//!
//! evdevil's [`EventReader`] keeps the multitouch slot state, including the
//! resync after the kernel drops events. A scan drains every queued report
//! and publishes the slot state left by the newest one, the same way the
//! controller's status register would report it.

use std::io;

use evdevil::event::Abs;
use evdevil::{Evdev, EventReader};

use crate::device::PanelProfile;
use crate::gpio::InterruptPin;

use super::{publish_frame, Contact, TouchController, TouchSample};

/// Upper bound on slots walked per frame; the goodix driver exposes 10.
const MT_SLOTS: u16 = 16;

/// Identity the controller reports at init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerId {
    pub name: String,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Source of multitouch state: the kernel through [`EventReader`], or a fake in tests.
pub trait SlotSource {
    /// Consume every queued report. Returns how many were read.
    fn drain(&mut self) -> io::Result<usize>;

    /// Current value of an `ABS_MT_*` axis in `slot`. `None` past the last
    /// slot or for an axis the device does not report.
    fn slot_value(&self, slot: u16, axis: Abs) -> Option<i32>;

    fn identify(&self) -> io::Result<ControllerId>;
}

impl SlotSource for EventReader {
    fn drain(&mut self) -> io::Result<usize> {
        let mut reports = 0;
        for report in self.reports() {
            report?;
            reports += 1;
        }
        Ok(reports)
    }

    fn slot_value(&self, slot: u16, axis: Abs) -> Option<i32> {
        self.slot_state(slot, axis)
    }

    fn identify(&self) -> io::Result<ControllerId> {
        let evdev = self.evdev();
        let id = evdev.input_id()?;
        Ok(ControllerId {
            name: evdev.name()?,
            vendor: id.vendor(),
            product: id.product(),
            version: id.version(),
        })
    }
}

pub struct EvdevTouch<S> {
    source: S,
    path: String,
    profile: &'static PanelProfile,
    frames: u64,
}

impl EvdevTouch<EventReader> {
    /// Open the touch node non-blocking.
    pub fn open(path: &str, profile: &'static PanelProfile) -> io::Result<Self> {
        let evdev = Evdev::open(path)?;
        evdev.set_nonblocking(true)?;
        log::debug!("Opened touch device {}", path);
        Ok(Self::new(evdev.into_reader()?, path, profile))
    }

    /// Interrupt line derived from the node's readiness: low while events are queued.
    pub fn ready_pin(&self) -> io::Result<ReadyPin<Evdev>> {
        Ok(ReadyPin::new(self.source.evdev().try_clone()?))
    }
}

impl<S: SlotSource> EvdevTouch<S> {
    pub fn new(source: S, path: &str, profile: &'static PanelProfile) -> Self {
        Self {
            source,
            path: path.to_string(),
            profile,
            frames: 0,
        }
    }

    /// Read everything queued right now. Returns the newest frame, if any report arrived.
    fn read_pending(&mut self) -> io::Result<Option<Vec<Contact>>> {
        let reports = self.source.drain()?;
        if reports == 0 {
            return Ok(None);
        }

        self.frames += reports as u64;
        if self.frames == reports as u64 {
            log::info!("Touch events flowing from {}", self.path);
        } else {
            log::trace!("Touch frames: {}", self.frames);
        }
        Ok(Some(self.contacts()))
    }

    /// Slots holding a finger, clamped to the panel.
    fn contacts(&self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        for slot in 0..MT_SLOTS {
            let Some(tracking) = self.source.slot_value(slot, Abs::MT_TRACKING_ID) else {
                break;
            };
            if tracking < 0 {
                continue;
            }
            let x = self.source.slot_value(slot, Abs::MT_POSITION_X);
            let y = self.source.slot_value(slot, Abs::MT_POSITION_Y);
            let Some((x, y)) = x.zip(y) else {
                continue;
            };
            let size = self
                .source
                .slot_value(slot, Abs::MT_TOUCH_MAJOR)
                .or_else(|| self.source.slot_value(slot, Abs::MT_PRESSURE))
                .unwrap_or(0);
            let (x, y, size) = self.profile.clamp_touch(x, y, size);
            contacts.push(Contact { track_id: slot, x, y, size });
        }
        contacts
    }
}

impl<S: SlotSource> TouchController for EvdevTouch<S> {
    fn init(&mut self) -> io::Result<()> {
        let id = self.source.identify()?;
        log::info!(
            "Touch controller \"{}\" on {} (vendor 0x{:04x}, product 0x{:04x}, version 0x{:04x})",
            id.name,
            self.path,
            id.vendor,
            id.product,
            id.version
        );
        let p = self.profile;
        log::debug!(
            "Wiring: i2c 0x{:02x}, INT line {}, TRST line {}",
            p.touch_i2c_address,
            p.int_line,
            p.trst_line
        );

        // Reports queued before init belong to a previous session.
        let stale = self.source.drain()?;
        if stale > 0 {
            log::debug!("Discarded {} stale touch reports", stale);
        }
        Ok(())
    }

    fn scan(&mut self, dev: &mut TouchSample, old: &mut TouchSample) -> io::Result<()> {
        if !dev.touch.take() {
            return Ok(());
        }

        let Some(contacts) = self.read_pending()? else {
            return Ok(());
        };

        if !publish_frame(dev, old, &contacts) {
            log::trace!("Frame with {} contacts not published", contacts.len());
        }
        Ok(())
    }
}

/// Answers, without blocking, whether events are waiting to be read.
pub trait EventQueue: Send {
    fn has_events(&self) -> io::Result<bool>;
}

impl EventQueue for Evdev {
    fn has_events(&self) -> io::Result<bool> {
        self.is_readable()
    }
}

/// Reads 0 while the queue has events, 1 otherwise.
pub struct ReadyPin<Q> {
    queue: Q,
}

impl<Q: EventQueue> ReadyPin<Q> {
    pub fn new(queue: Q) -> Self {
        Self { queue }
    }
}

impl<Q: EventQueue> InterruptPin for ReadyPin<Q> {
    fn digital_read(&mut self) -> io::Result<u8> {
        Ok(if self.queue.has_events()? { 0 } else { 1 })
    }
}
