// Funkeys CLI
// Grabs one keyboard and re-emits it through a remapping virtual clone

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use funkeys_core::input::{is_keyboard, list_devices, DeviceEntry, BY_ID_DIR};
use funkeys_core::settings::Settings;
use funkeys_core::{Driver, EvdevSource, VirtualDevice};

/// CapsLock <-> LeftCtrl, RightCtrl -> Enter, and Enter that turns into
/// RightCtrl when held or combined with another key
#[derive(Parser, Debug)]
#[command(name = "funkeys")]
#[command(version)]
#[command(about = "Dual-role Enter and Ctrl/CapsLock swap for one keyboard", long_about = None)]
struct Args {
    /// Input device to remap (e.g. /dev/input/by-id/usb-...-event-kbd)
    #[arg(value_name = "DEVICE")]
    device: Option<PathBuf>,

    /// TOML settings file (default: ~/.config/funkeys/settings.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long)]
    verbose: bool,

    /// List available input devices and exit
    #[arg(long)]
    list_devices: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,

    /// Write a commented settings file (at CONFIG or the default path) and exit
    #[arg(long)]
    init_config: bool,
}

/// Shown on stderr, followed by the device list, when DEVICE is missing
const MISSING_DEVICE: &str = "\
Missing DEVICE argument.
Usage: sudo funkeys /dev/input/by-id/<keyboard>

Available devices:";

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

fn format_entry(entry: &DeviceEntry) -> String {
    let mut line = entry.path.display().to_string();
    if let Some(name) = &entry.name {
        line.push_str(&format!("  ({})", name));
    }
    if entry.is_keyboard {
        line.push_str("  [keyboard]");
    }
    line
}

/// Print every device under /dev/input/by-id
fn print_devices(out: &mut impl Write) -> Result<()> {
    let entries =
        list_devices(BY_ID_DIR).with_context(|| format!("Can't list {}", BY_ID_DIR))?;
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry))?;
    }
    Ok(())
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let settings = Settings::load(config).with_context(|| match config {
        Some(path) => format!("Can't load settings from {}", path.display()),
        None => "Can't load default settings".to_string(),
    })?;
    match settings.source_path() {
        Some(path) => log::debug!("Loaded settings from {}", path.display()),
        None => log::debug!("Using default settings"),
    }
    Ok(settings)
}

fn init_config(config: Option<&Path>) -> Result<()> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => Settings::default_path().context("No config directory for this user")?,
    };
    Settings::write_default(&path).with_context(|| format!("Can't write {}", path.display()))?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

/// Attach to the device and translate until something fatal happens
fn run(device_path: &Path, settings: &Settings) -> Result<()> {
    // Let the Enter that started us come back up before grabbing,
    // otherwise it stays pressed on the virtual device
    let delay = settings.startup_delay();
    if !delay.is_zero() {
        log::debug!("Waiting {:?} before attaching", delay);
        std::thread::sleep(delay);
    }

    let mut source = EvdevSource::open(device_path)?;
    log::info!("Attached to {} ({})", source.name(), source.path().display());
    if !is_keyboard(&source.capabilities()) {
        log::warn!(
            "{} does not look like a keyboard, remapping anyway",
            device_path.display()
        );
    }

    let sink = VirtualDevice::from_device(source.device(), settings.virtual_name())?;

    if settings.grab() {
        source.grab()?;
    } else {
        log::warn!("Device not grabbed: the system will see both original and remapped keys");
    }

    let mut driver = Driver::new(source, sink);
    let result = driver.run();
    log::debug!("Event loop statistics: {:?}", driver.stats());
    result.context("Event loop stopped")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.list_devices {
        return print_devices(&mut std::io::stdout().lock());
    }

    if args.init_config {
        return init_config(args.config.as_deref());
    }

    let settings = load_settings(args.config.as_deref())?;
    if args.check_config {
        println!("Configuration is valid");
        return Ok(());
    }

    let Some(device_path) = args.device else {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", MISSING_DEVICE)?;
        if let Err(e) = print_devices(&mut err) {
            writeln!(err, "{:#}", e)?;
        }
        std::process::exit(1);
    };

    run(&device_path, &settings)
}
