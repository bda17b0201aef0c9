// The push workflow, strictly sequential: credentials, client, device
// resolution, message classification, dispatch. No step loops back.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::api::{ApiClient, PushApi};
use crate::cli::Cli;
use crate::content::{self, ContentKind};
use crate::device::{self, Target};
use crate::keys;
use crate::push;
use crate::ui;

/// Run one push with the real client, creating it from the cached (or
/// freshly prompted) API key.
pub fn run(cli: Cli) -> Result<()> {
    let api_key = keys::get_api_key()?;
    let api = ApiClient::new(&api_key)?;
    run_with(cli, &api)
}

/// The workflow against any `PushApi`, so tests can drive it end to end
/// with a fake client.
pub fn run_with(cli: Cli, api: &impl PushApi) -> Result<()> {
    let target = Target::from_cli(&cli);

    // Broadcast needs no device list at all; every other mode checks the
    // account actually has devices before going further.
    let device = if target == Target::All {
        None
    } else {
        let devices = api.devices()?;
        device::resolve(&target, &devices, ui::prompt_device)?
    };

    // Piped or prompted stdin content is always a note; only words given
    // on the command line are classified.
    let (content, kind) = if cli.msg.is_empty() {
        (ui::read_message()?, ContentKind::Note)
    } else {
        let message = cli.message();
        let kind = content::classify(&message);
        (message, kind)
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Pushing...");
    let result = push::push(api, device.as_ref(), &content, kind);
    spinner.finish_and_clear();
    result
}
