// Device resolution: turns the selection flags plus the account's device
// list into the zero-or-one device a push is routed to. `None` means no
// routing option is sent and the service applies its own default
// (which for `--all` is every device).

use anyhow::Result;
use thiserror::Error;

use crate::api::Device;
use crate::cli::Cli;

/// How the user asked to select a device, decoded from the flags. The
/// flags are mutually exclusive at parse time, so this is total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// `--all`: broadcast, no device lookup at all.
    All,
    /// `--interactive`: menu prompt over the device list.
    Interactive,
    /// `--device NAME`: exact nickname match.
    ByName(String),
    /// No flag given: service-default targeting.
    Default,
}

impl Target {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.all {
            Target::All
        } else if cli.interactive {
            Target::Interactive
        } else if let Some(name) = &cli.device {
            Target::ByName(name.clone())
        } else {
            Target::Default
        }
    }
}

/// Conditions the user can fix on the next invocation. `main` prints
/// these without the generic error prefix and exits with status 1.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("You don't have any devices!\nAdd one at <https://www.pushbullet.com/>.")]
    NoDevices,
    #[error("Unknown device {name}. Available devices: {known}")]
    UnknownDevice { name: String, known: String },
}

/// Resolve the push target. `choose` is only invoked for
/// `Target::Interactive`; production passes the terminal menu, tests a
/// canned closure.
pub fn resolve(
    target: &Target,
    devices: &[Device],
    choose: impl FnOnce(&[Device]) -> Result<Device>,
) -> Result<Option<Device>> {
    match target {
        Target::All => Ok(None),
        _ if devices.is_empty() => Err(UserError::NoDevices.into()),
        Target::Interactive => Ok(Some(choose(devices)?)),
        Target::ByName(name) => Ok(Some(find_by_name(devices, name)?)),
        Target::Default => Ok(None),
    }
}

/// Exact, case-sensitive nickname lookup.
fn find_by_name(devices: &[Device], name: &str) -> Result<Device> {
    match devices.iter().find(|d| d.nickname == name) {
        Some(device) => Ok(device.clone()),
        None => Err(UserError::UnknownDevice {
            name: name.to_string(),
            known: devices
                .iter()
                .map(|d| d.nickname.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
        .into()),
    }
}
