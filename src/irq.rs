//! Background thread mirroring the INT line into the touch record's irq flag.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::gpio::InterruptPin;
use crate::shutdown::RunFlag;
use crate::touch::IrqFlag;

/// Sample the pin once. Low means the controller has data.
pub fn poll_once(pin: &mut impl InterruptPin, flag: &IrqFlag) -> io::Result<u8> {
    let value = pin.digital_read()?;
    flag.set(value == 0);
    Ok(value)
}

/// Handle to the running poller. Dropping it detaches the thread.
pub struct IrqPoller {
    handle: JoinHandle<()>,
}

impl IrqPoller {
    /// Spawn the poller. It runs until `run` is stopped or the pin fails.
    ///
    /// A zero `interval` spins, yielding between reads.
    pub fn spawn<P>(mut pin: P, flag: IrqFlag, run: RunFlag, interval: Duration) -> io::Result<Self>
    where
        P: InterruptPin + 'static,
    {
        let handle = thread::Builder::new()
            .name("touch-irq".into())
            .spawn(move || {
                log::info!("irq poller running");
                while run.is_running() {
                    match poll_once(&mut pin, &flag) {
                        Ok(value) => log::trace!("INT={} touch={}", value, flag.get()),
                        Err(e) => {
                            log::error!("irq poller: {}", e);
                            break;
                        }
                    }
                    if interval.is_zero() {
                        thread::yield_now();
                    } else {
                        thread::sleep(interval);
                    }
                }
                log::info!("irq poller exit");
            })?;

        Ok(Self { handle })
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Wait for the thread. Blocks for as long as a pin read blocks.
    pub fn join(self) -> bool {
        match self.handle.join() {
            Ok(()) => true,
            Err(_) => {
                log::error!("irq poller panicked");
                false
            }
        }
    }
}
