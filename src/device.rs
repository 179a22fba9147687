/*!
 * Execution device selection for the neural model.
 *
 * The device is resolved exactly once at startup and handed to the model
 * handle; requests never re-select it.
 */

use log::{debug, info};
use std::path::Path;

use crate::app_config::DeviceChoice;

/// Environment variable that overrides the configured device
pub const DEVICE_ENV_VAR: &str = "HUMANISER_DEVICE";

/// Device files whose presence indicates a usable accelerator
const ACCELERATOR_DEVICE_FILES: &[&str] = &["/dev/nvidia0", "/dev/kfd"];

/// Resolved execution device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// GPU or other accelerator
    Accelerated,
    /// General-purpose CPU
    Cpu,
}

impl Device {
    /// Resolve the device from the configured choice, the environment
    /// override and the hardware that is visible to the process.
    pub fn select(configured: DeviceChoice) -> Self {
        let choice = match std::env::var(DEVICE_ENV_VAR) {
            Ok(value) => match value.parse::<DeviceChoice>() {
                Ok(choice) => {
                    debug!("{} overrides configured device with '{}'", DEVICE_ENV_VAR, value);
                    choice
                }
                Err(_) => {
                    debug!("Ignoring unrecognised {} value '{}'", DEVICE_ENV_VAR, value);
                    configured
                }
            },
            Err(_) => configured,
        };

        let device = Self::resolve(choice, accelerator_present());
        info!("Neural model will run on {}", device);
        device
    }

    /// Pure resolution step, separated so it can be tested without hardware
    pub fn resolve(choice: DeviceChoice, accelerator_available: bool) -> Self {
        match choice {
            DeviceChoice::Cpu => Device::Cpu,
            DeviceChoice::Gpu => Device::Accelerated,
            DeviceChoice::Auto if accelerator_available => Device::Accelerated,
            DeviceChoice::Auto => Device::Cpu,
        }
    }

    /// Number of model layers to offload, `None` meaning "backend decides"
    pub fn gpu_layers(&self) -> Option<u32> {
        match self {
            Device::Accelerated => None,
            Device::Cpu => Some(0),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Accelerated => write!(f, "accelerator"),
            Device::Cpu => write!(f, "cpu"),
        }
    }
}

fn accelerator_present() -> bool {
    if let Ok(visible) = std::env::var("CUDA_VISIBLE_DEVICES") {
        let visible = visible.trim();
        if !visible.is_empty() && visible != "-1" {
            return true;
        }
    }

    ACCELERATOR_DEVICE_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
