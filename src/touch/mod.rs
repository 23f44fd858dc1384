//! Touch state records and the touch controller seam.
//!
//! A [`TouchSample`] mirrors the GT1151 "development" record: up to
//! [`TOUCH_SLOTS`] contacts with X, Y and size, a contact count, the
//! new-touchpoint flag and the interrupt flag written by the irq poller.

mod event;
mod evdev;
mod mock;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use event::code_name;
pub use evdev::EvdevTouch;
pub use mock::{scripted_pair, TouchPoint};

/// Contacts the GT1151 reports per frame.
pub const TOUCH_SLOTS: usize = 5;

/// Interrupt flag shared between the irq poller (writer) and the scan (reader).
#[derive(Debug, Clone, Default)]
pub struct IrqFlag(Arc<AtomicBool>);

impl IrqFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pending: bool) {
        self.0.store(pending, Ordering::Release);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Read and clear in one step.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

#[derive(Debug, Clone)]
pub struct TouchSample {
    pub touch: IrqFlag,
    pub touchpoint_flag: bool,
    pub touch_count: usize,
    pub track_id: [u16; TOUCH_SLOTS],
    pub x: [u16; TOUCH_SLOTS],
    pub y: [u16; TOUCH_SLOTS],
    pub s: [u16; TOUCH_SLOTS],
}

impl TouchSample {
    /// Slots start out as `0..5` so a fresh current/previous pair compares equal.
    pub fn new() -> Self {
        let seed = [0, 1, 2, 3, 4];
        Self {
            touch: IrqFlag::new(),
            touchpoint_flag: false,
            touch_count: 0,
            track_id: seed,
            x: seed,
            y: seed,
            s: seed,
        }
    }

    /// Copy slot 0 into `old` before a new frame overwrites it.
    pub fn roll_first_into(&self, old: &mut TouchSample) {
        old.x[0] = self.x[0];
        old.y[0] = self.y[0];
        old.s[0] = self.s[0];
    }
}

impl Default for TouchSample {
    fn default() -> Self {
        Self::new()
    }
}

/// True when X, Y and size of the first slot match.
pub fn same_first_point(a: &TouchSample, b: &TouchSample) -> bool {
    a.x[0] == b.x[0] && a.y[0] == b.y[0] && a.s[0] == b.s[0]
}

/// Touch controller driver (GT_Init / GT_Scan).
pub trait TouchController {
    /// Bring the controller up.
    fn init(&mut self) -> io::Result<()>;

    /// Refresh `dev` from the controller.
    ///
    /// Backends only read when `dev.touch` is pending and consume it. When a
    /// frame with 1..=5 contacts is read, slot 0 of `dev` is rolled into `old`
    /// first and `touchpoint_flag` is raised.
    fn scan(&mut self, dev: &mut TouchSample, old: &mut TouchSample) -> io::Result<()>;
}

/// A decoded contact, as published to a [`TouchSample`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub track_id: u16,
    pub x: u16,
    pub y: u16,
    pub size: u16,
}

/// Write one controller frame into `dev`, following GT_Scan.
///
/// Returns false and leaves both records alone if the count is out of range.
pub(crate) fn publish_frame(dev: &mut TouchSample, old: &mut TouchSample, contacts: &[Contact]) -> bool {
    if contacts.is_empty() || contacts.len() > TOUCH_SLOTS {
        return false;
    }

    dev.touchpoint_flag = true;
    dev.touch_count = contacts.len();
    dev.roll_first_into(old);

    for (i, c) in contacts.iter().enumerate() {
        dev.track_id[i] = c.track_id;
        dev.x[i] = c.x;
        dev.y[i] = c.y;
        dev.s[i] = c.size;
    }
    true
}
