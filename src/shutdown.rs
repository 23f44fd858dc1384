//! Cooperative stop signals: the irq poller's run flag and the Ctrl+C interrupt.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Run flag handed to the irq poller at spawn time. Starts out running.
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Raised once the user asks the demo to stop.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Exit status for a second Ctrl+C, the shell's 128 + SIGINT.
pub const FORCED_EXIT: i32 = 130;

/// Raise `interrupt` on SIGINT.
///
/// The handler replaces the default termination. A second Ctrl+C exits the
/// process with [`FORCED_EXIT`], so a shutdown stuck in a join can still be
/// killed.
pub fn watch_ctrl_c(interrupt: Interrupt) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("ctrl-c".into())
        .spawn(move || {
            runtime.block_on(handle_signals(interrupt, tokio::signal::ctrl_c, |code| {
                std::process::exit(code)
            }))
        })?;

    Ok(())
}

async fn handle_signals<S, F>(interrupt: Interrupt, mut signal: S, exit: impl FnOnce(i32))
where
    S: FnMut() -> F,
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal().await {
        log::warn!("Cannot listen for Ctrl+C: {}", e);
        return;
    }
    interrupt.raise();

    if signal().await.is_ok() {
        log::warn!("Second Ctrl+C, exiting without waiting for the irq poller");
        exit(FORCED_EXIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flag_stops_every_clone() {
        let run = RunFlag::new();
        let seen_by_thread = run.clone();
        assert!(seen_by_thread.is_running());
        run.stop();
        assert!(!seen_by_thread.is_running());
    }

    #[test]
    fn interrupt_starts_lowered() {
        let i = Interrupt::new();
        assert!(!i.is_raised());
        i.clone().raise();
        assert!(i.is_raised());
    }

    fn drive(results: Vec<io::Result<()>>) -> (bool, Option<i32>) {
        let interrupt = Interrupt::new();
        let mut results: std::collections::VecDeque<_> = results.into();
        let mut exited = None;

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(handle_signals(
            interrupt.clone(),
            || {
                let next = results.pop_front().unwrap_or_else(|| Err(io::Error::other("no more signals")));
                async move { next }
            },
            |code| exited = Some(code),
        ));
        (interrupt.is_raised(), exited)
    }

    #[test]
    fn first_ctrl_c_raises_the_interrupt() {
        assert_eq!(drive(vec![Ok(()), Err(io::Error::other("closed"))]), (true, None));
    }

    #[test]
    fn second_ctrl_c_forces_exit() {
        assert_eq!(drive(vec![Ok(()), Ok(())]), (true, Some(FORCED_EXIT)));
    }

    #[test]
    fn listener_failure_raises_nothing() {
        assert_eq!(drive(vec![Err(io::Error::other("no signal support"))]), (false, None));
    }
}
