mod config;
mod demo;
mod device;
mod display;
mod dump;
mod gpio;
mod irq;
mod shutdown;
mod touch;

use clap::Parser;

use config::{Backend, Cli, Command, Config, IrqSource};
use demo::{Demo, Exit};
use device::PanelProfile;
use display::HeadlessDisplay;
use gpio::InterruptPin;
use shutdown::Interrupt;
use touch::EvdevTouch;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let panel = PanelProfile::current();
    let config = Config::load(&cli, panel);

    if let Some(Command::Dump) = cli.command {
        return dump::run_dump_touch(&config.touch_device);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    log::info!(
        "{} touch demo ({}x{}, backend={}, irq={})",
        panel.name,
        panel.width,
        panel.height,
        config.backend,
        config.irq_source
    );

    let interrupt = Interrupt::new();
    shutdown::watch_ctrl_c(interrupt.clone())?;

    let exit = match config.backend {
        Backend::Hardware => run_hardware(&config, panel, &interrupt),
        Backend::Mock => run_mock(&config, panel, &interrupt),
    };

    match exit {
        Exit::Interrupted { poller_stopped } => {
            if !poller_stopped {
                log::warn!("irq poller did not stop cleanly");
            }
            std::process::exit(0);
        }
        Exit::Failed { error, poller } => {
            log::debug!("demo ended on {:?}", error.kind());
            if poller.is_some_and(|p| p.is_running()) {
                log::debug!("irq poller left running until exit");
            }
        }
    }

    Ok(())
}

fn run_hardware(config: &Config, panel: &'static PanelProfile, interrupt: &Interrupt) -> Exit {
    let touch = match EvdevTouch::open(&config.touch_device, panel) {
        Ok(touch) => touch,
        Err(error) => return setup_failed(error),
    };

    let pin: Box<dyn InterruptPin> = match config.irq_source {
        IrqSource::Evdev => match touch.ready_pin() {
            Ok(pin) => Box::new(pin),
            Err(error) => return setup_failed(error),
        },
        IrqSource::Gpio => match gpio::open_cdev_pin(&config.gpio_chip, config.int_line) {
            Ok(pin) => Box::new(pin),
            Err(error) => return setup_failed(error),
        },
    };

    let mut demo = Demo::new(HeadlessDisplay::new(panel.name), touch, config.settings());
    demo.run(pin, interrupt)
}

fn run_mock(config: &Config, panel: &'static PanelProfile, interrupt: &Interrupt) -> Exit {
    if config.irq_source == IrqSource::Gpio {
        log::warn!("Mock backend drives its own INT line, ignoring --irq-source gpio");
    }

    let (touch, pin) = touch::scripted_pair(config.mock_points.clone(), panel);
    let mut demo = Demo::new(HeadlessDisplay::new(panel.name), touch, config.settings());
    demo.run(pin, interrupt)
}

fn setup_failed(error: std::io::Error) -> Exit {
    log::info!("{}", error);
    Exit::Failed { error, poller: None }
}
