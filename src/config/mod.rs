mod cli;
mod file;

pub use cli::{Cli, Command};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::demo::Settings;
use crate::device::PanelProfile;
use crate::touch::TouchPoint;

/// Where touch data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// GT1151 through the kernel's evdev node.
    #[default]
    Hardware,
    /// Points scripted in the config file.
    Mock,
}

/// What the irq poller samples as the INT line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IrqSource {
    /// Readiness of the touch node (the kernel driver owns the INT GPIO).
    #[default]
    Evdev,
    /// The INT GPIO line itself, through the character device.
    Gpio,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Hardware => write!(f, "hardware"),
            Backend::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hardware" | "hw" => Ok(Backend::Hardware),
            "mock" => Ok(Backend::Mock),
            _ => Err(format!("Invalid backend '{}'. Valid values: hardware, mock", s)),
        }
    }
}

impl fmt::Display for IrqSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrqSource::Evdev => write!(f, "evdev"),
            IrqSource::Gpio => write!(f, "gpio"),
        }
    }
}

impl FromStr for IrqSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "evdev" => Ok(IrqSource::Evdev),
            "gpio" => Ok(IrqSource::Gpio),
            _ => Err(format!("Invalid irq source '{}'. Valid values: evdev, gpio", s)),
        }
    }
}

/// Merged configuration from CLI args and TOML file.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub touch_device: String,
    pub irq_source: IrqSource,
    pub gpio_chip: String,
    pub int_line: u32,
    pub irq_poll_us: u64,
    pub scan_idle_ms: u64,
    pub shutdown_grace_ms: u64,
    pub mock_points: Vec<TouchPoint>,
}

impl Config {
    /// Load configuration by merging TOML file with CLI overrides.
    pub fn load(cli: &Cli, panel: &PanelProfile) -> Self {
        let file_config = cli
            .config
            .as_ref()
            .and_then(|p| file::load_from_path(p))
            .or_else(file::load_from_default_paths)
            .unwrap_or_default();

        Self {
            backend: cli.backend.unwrap_or(file_config.backend),
            touch_device: cli
                .touch_device
                .clone()
                .unwrap_or_else(|| file_config.touch_device.unwrap_or(panel.touch_device.into())),
            irq_source: cli.irq_source.unwrap_or(file_config.irq_source),
            gpio_chip: cli
                .gpio_chip
                .clone()
                .unwrap_or_else(|| file_config.gpio_chip.unwrap_or(panel.gpio_chip.into())),
            int_line: cli.int_line.or(file_config.int_line).unwrap_or(panel.int_line),
            irq_poll_us: cli.irq_poll_us.or(file_config.irq_poll_us).unwrap_or(1000),
            scan_idle_ms: cli.scan_idle_ms.or(file_config.scan_idle_ms).unwrap_or(20),
            shutdown_grace_ms: cli
                .shutdown_grace_ms
                .or(file_config.shutdown_grace_ms)
                .unwrap_or(2000),
            mock_points: file_config.mock.points,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            irq_poll: Duration::from_micros(self.irq_poll_us),
            scan_idle: Duration::from_millis(self.scan_idle_ms),
            shutdown_grace: Duration::from_millis(self.shutdown_grace_ms),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.backend == Backend::Hardware && self.touch_device.is_empty() {
            return Err("No touch device configured");
        }
        if self.irq_source == IrqSource::Gpio && self.gpio_chip.is_empty() {
            return Err("No GPIO chip configured for --irq-source gpio");
        }
        if self.backend == Backend::Mock && self.mock_points.is_empty() {
            return Err("Mock backend needs [mock] points in the config file");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::device::EPD_2IN13_V3;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["epd-touch", "--config", "/nonexistent/epd-touch.toml"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn defaults_come_from_the_panel() {
        let config = Config::load(&cli(&[]), &EPD_2IN13_V3);
        assert_eq!(config.backend, Backend::Hardware);
        assert_eq!(config.touch_device, EPD_2IN13_V3.touch_device);
        assert_eq!(config.int_line, 27);
        assert_eq!(config.settings().shutdown_grace, Duration::from_secs(2));
        assert_eq!(config.settings().scan_idle, Duration::from_millis(20));
    }

    #[test]
    fn cli_overrides_defaults() {
        let config = Config::load(
            &cli(&["--irq-source", "gpio", "--int-line", "4", "--irq-poll-us", "0"]),
            &EPD_2IN13_V3,
        );
        assert_eq!(config.irq_source, IrqSource::Gpio);
        assert_eq!(config.int_line, 4);
        assert!(config.settings().irq_poll.is_zero());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mock_without_points_is_rejected() {
        let config = Config::load(&cli(&["--backend", "mock"]), &EPD_2IN13_V3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_enums() {
        assert_eq!("HW".parse::<Backend>().unwrap(), Backend::Hardware);
        assert_eq!("gpio".parse::<IrqSource>().unwrap(), IrqSource::Gpio);
        assert!("serial".parse::<IrqSource>().is_err());
    }
}
