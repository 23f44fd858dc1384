//! The touch demo: bring up the panel and controller, start the irq poller,
//! then scan until interrupted or an I/O error ends the loop.

use std::io;
use std::thread;
use std::time::Duration;

use crate::display::{EpdDisplay, FULL_UPDATE};
use crate::gpio::InterruptPin;
use crate::irq::IrqPoller;
use crate::shutdown::{Interrupt, RunFlag};
use crate::touch::{same_first_point, TouchController, TouchSample};

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Delay between irq poller reads; zero spins.
    pub irq_poll: Duration,
    /// Delay after a scan that saw no change; zero spins.
    pub scan_idle: Duration,
    /// Time the irq poller gets to notice the stop before it is joined.
    pub shutdown_grace: Duration,
}

/// Outcome of one scan iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// First contact identical to the previous sample.
    Unchanged,
    /// First contact moved; `cleared` is set when the new-touchpoint flag was reset.
    Changed { cleared: bool },
}

/// How [`Demo::run`] ended.
pub enum Exit {
    /// Ctrl+C: the poller was stopped and joined.
    Interrupted { poller_stopped: bool },
    /// I/O failure. The poller, if it was started, is handed back still running.
    Failed {
        error: io::Error,
        poller: Option<IrqPoller>,
    },
}

pub struct Demo<D, T> {
    display: D,
    touch: T,
    settings: Settings,
    dev: TouchSample,
    old: TouchSample,
    run: RunFlag,
}

impl<D: EpdDisplay, T: TouchController> Demo<D, T> {
    pub fn new(display: D, touch: T, settings: Settings) -> Self {
        Self {
            display,
            touch,
            settings,
            dev: TouchSample::new(),
            old: TouchSample::new(),
            run: RunFlag::new(),
        }
    }

    /// Stop signal shared with the irq poller.
    #[cfg(test)]
    pub fn run_flag(&self) -> RunFlag {
        self.run.clone()
    }

    /// Panel in full update mode, controller init, then the irq poller.
    pub fn start<P>(&mut self, pin: P) -> io::Result<IrqPoller>
    where
        P: InterruptPin + 'static,
    {
        self.display.init(FULL_UPDATE)?;
        self.touch.init()?;
        IrqPoller::spawn(pin, self.dev.touch.clone(), self.run.clone(), self.settings.irq_poll)
    }

    /// Scan once and compare the first contact against the previous sample.
    pub fn step(&mut self) -> io::Result<Step> {
        self.touch.scan(&mut self.dev, &mut self.old)?;

        if same_first_point(&self.dev, &self.old) {
            return Ok(Step::Unchanged);
        }

        let cleared = self.dev.touchpoint_flag;
        if cleared {
            self.dev.touchpoint_flag = false;
            log::debug!(
                "{} contacts: x {:?} (was {}) y {:?} (was {}) s {:?} (was {})",
                self.dev.touch_count,
                self.dev.x,
                self.old.x[0],
                self.dev.y,
                self.old.y[0],
                self.dev.s,
                self.old.s[0]
            );
        }
        Ok(Step::Changed { cleared })
    }

    pub fn run<P>(&mut self, pin: P, interrupt: &Interrupt) -> Exit
    where
        P: InterruptPin + 'static,
    {
        let poller = match self.start(pin) {
            Ok(poller) => poller,
            Err(error) => {
                log::info!("{}", error);
                return Exit::Failed { error, poller: None };
            }
        };

        loop {
            if interrupt.is_raised() {
                return self.shutdown(poller);
            }

            match self.step() {
                Ok(Step::Unchanged) => {
                    if !self.settings.scan_idle.is_zero() {
                        thread::sleep(self.settings.scan_idle);
                    }
                }
                Ok(Step::Changed { .. }) => {}
                Err(error) => {
                    // The poller keeps running; nothing stops it on this path.
                    log::info!("{}", error);
                    return Exit::Failed {
                        error,
                        poller: Some(poller),
                    };
                }
            }
        }
    }

    fn shutdown(&self, poller: IrqPoller) -> Exit {
        log::info!("ctrl + c:");
        self.run.stop();
        thread::sleep(self.settings.shutdown_grace);
        let poller_stopped = poller.join();
        Exit::Interrupted { poller_stopped }
    }
}
