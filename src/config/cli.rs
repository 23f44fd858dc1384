use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::{Backend, IrqSource};

#[derive(Parser)]
#[command(name = "epd-touch")]
#[command(about = "Touch demo for the Waveshare 2.13\" Touch e-Paper HAT")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Touch source (hardware, mock)
    #[arg(long, env = "EPD_TOUCH_BACKEND", value_parser = clap::value_parser!(Backend))]
    pub backend: Option<Backend>,

    /// Touch controller evdev node
    #[arg(long)]
    pub touch_device: Option<String>,

    /// INT line source for the irq poller (evdev, gpio)
    #[arg(long, value_parser = clap::value_parser!(IrqSource))]
    pub irq_source: Option<IrqSource>,

    /// GPIO character device holding the INT line
    #[arg(long)]
    pub gpio_chip: Option<String>,

    /// INT line offset on the GPIO chip
    #[arg(long)]
    pub int_line: Option<u32>,

    /// Microseconds between INT line reads (0 spins)
    #[arg(long)]
    pub irq_poll_us: Option<u64>,

    /// Milliseconds to wait after a scan with no change (0 spins)
    #[arg(long)]
    pub scan_idle_ms: Option<u64>,

    /// Milliseconds the irq poller gets to stop after Ctrl+C
    #[arg(long)]
    pub shutdown_grace_ms: Option<u64>,

    /// Path to config file
    #[arg(long, env = "EPD_TOUCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Dump raw touch events for debugging
    Dump,
}
