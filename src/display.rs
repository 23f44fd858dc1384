//! E-paper panel seam. Only initialization is driven by the demo.

use std::fmt;
use std::io;

/// Refresh mode the panel is initialized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Redraw the whole panel.
    #[default]
    Full,
}

pub const FULL_UPDATE: UpdateMode = UpdateMode::Full;

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateMode::Full => write!(f, "full"),
        }
    }
}

/// E-paper display driver.
pub trait EpdDisplay {
    fn init(&mut self, mode: UpdateMode) -> io::Result<()>;
}

/// Stands in for the panel when no refresh driver is wired up; records the mode.
#[derive(Debug)]
pub struct HeadlessDisplay {
    name: &'static str,
    pub(crate) mode: Option<UpdateMode>,
}

impl HeadlessDisplay {
    pub fn new(name: &'static str) -> Self {
        Self { name, mode: None }
    }
}

impl EpdDisplay for HeadlessDisplay {
    fn init(&mut self, mode: UpdateMode) -> io::Result<()> {
        log::info!("init and Clear ({}, {} update)", self.name, mode);
        self.mode = Some(mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_remembers_mode() {
        let mut d = HeadlessDisplay::new("test");
        assert_eq!(d.mode, None);
        d.init(FULL_UPDATE).unwrap();
        assert_eq!(d.mode, Some(UpdateMode::Full));
    }

    #[test]
    fn mode_names() {
        assert_eq!(FULL_UPDATE.to_string(), "full");
        assert_eq!(UpdateMode::default(), FULL_UPDATE);
    }
}
