//! Host capabilities the dispatcher depends on: battery, vibration, clock.
//!
//! A host that lacks a capability reports `is_available() == false`; the
//! dispatcher turns that into a spoken message, never a crash.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::trace;

/// Errors from reading or driving a device capability.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The capability exists but could not be read.
    #[error("device read failed: {0}")]
    Read(String),

    /// The capability exists but the command was rejected.
    #[error("device command failed: {0}")]
    Command(String),
}

/// A battery reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    /// Charge level in `[0, 1]`.
    pub level: f64,
    /// Whether the device is plugged in and charging.
    pub charging: bool,
}

impl BatteryStatus {
    /// Charge level as a whole percentage, rounded, clamped to `0..=100`.
    // The clamp keeps the product within u8 range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.level.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Battery level source.
pub trait Battery: Send + Sync {
    /// Whether this host exposes a battery at all.
    fn is_available(&self) -> bool;

    /// Read the current status.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Read`] if the battery cannot be read.
    fn status(&self) -> Result<BatteryStatus, DeviceError>;
}

/// Haptic output.
pub trait Vibration: Send + Sync {
    /// Whether this host can vibrate.
    fn is_available(&self) -> bool;

    /// Vibrate with alternating on/off durations in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Command`] if the host rejects the pattern.
    fn vibrate(&self, pattern_ms: &[u32]) -> Result<(), DeviceError>;
}

/// Wall-clock source, injectable for tests.
pub trait Clock: Send + Sync {
    /// Current local time.
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A host without a battery.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBattery;

impl Battery for NoBattery {
    fn is_available(&self) -> bool {
        false
    }

    fn status(&self) -> Result<BatteryStatus, DeviceError> {
        Err(DeviceError::Read("no battery on this host".to_owned()))
    }
}

/// A host without a vibration motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVibration;

impl Vibration for NoVibration {
    fn is_available(&self) -> bool {
        false
    }

    fn vibrate(&self, _pattern_ms: &[u32]) -> Result<(), DeviceError> {
        Err(DeviceError::Command("no vibration motor on this host".to_owned()))
    }
}

/// Battery exposed through the Linux power-supply class.
///
/// Reads the first `BAT*` entry under the given root, normally
/// `/sys/class/power_supply`.
#[derive(Debug, Clone)]
pub struct SysfsBattery {
    root: PathBuf,
}

impl Default for SysfsBattery {
    fn default() -> Self {
        Self::new("/sys/class/power_supply")
    }
}

impl SysfsBattery {
    /// Battery rooted at a power-supply directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn battery_dir(&self) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.root).ok()?;
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("BAT"))
            .map(|e| e.path())
            .collect();
        dirs.sort();
        dirs.into_iter().next()
    }
}

fn read_attr(dir: &Path, name: &str) -> Result<String, DeviceError> {
    let path = dir.join(name);
    std::fs::read_to_string(&path)
        .map(|s| s.trim().to_owned())
        .map_err(|e| DeviceError::Read(format!("{}: {e}", path.display())))
}

impl Battery for SysfsBattery {
    fn is_available(&self) -> bool {
        self.battery_dir().is_some()
    }

    fn status(&self) -> Result<BatteryStatus, DeviceError> {
        let dir = self
            .battery_dir()
            .ok_or_else(|| DeviceError::Read("no battery found".to_owned()))?;

        let capacity = read_attr(&dir, "capacity")?;
        let percent: u8 = capacity
            .parse()
            .map_err(|e| DeviceError::Read(format!("bad capacity {capacity:?}: {e}")))?;
        // A missing status file means we cannot tell; report not charging.
        let charging = read_attr(&dir, "status")
            .map(|s| s.eq_ignore_ascii_case("charging"))
            .unwrap_or(false);

        trace!(dir = %dir.display(), percent, charging, "battery read");
        Ok(BatteryStatus {
            level: f64::from(percent) / 100.0,
            charging,
        })
    }
}

/// The capabilities a dispatcher talks to.
pub struct Device {
    /// Battery source.
    pub battery: Box<dyn Battery>,
    /// Vibration output.
    pub vibration: Box<dyn Vibration>,
    /// Time source.
    pub clock: Box<dyn Clock>,
}

impl Device {
    /// Capabilities of the machine this process runs on.
    pub fn host() -> Self {
        Self {
            battery: Box::new(SysfsBattery::default()),
            vibration: Box::new(NoVibration),
            clock: Box::new(SystemClock),
        }
    }

    /// A device with no battery and no vibration motor.
    pub fn headless() -> Self {
        Self {
            battery: Box::new(NoBattery),
            vibration: Box::new(NoVibration),
            clock: Box::new(SystemClock),
        }
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("battery", &self.battery.is_available())
            .field("vibration", &self.vibration.is_available())
            .finish()
    }
}
