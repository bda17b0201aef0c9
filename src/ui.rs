// UI layer: the interactive flows, kept apart from the decision logic so
// the latter stays testable without a terminal.

use anyhow::{Context, Result};
use dialoguer::Input;
use std::io::Read;

use crate::api::Device;

/// Show the device list as a zero-indexed menu and ask for a numeric
/// choice. Invalid input (not a number, out of range) is silently asked
/// again; the loop only ends with a valid pick or an interrupted prompt.
pub fn prompt_device(devices: &[Device]) -> Result<Device> {
    for (i, device) in devices.iter().enumerate() {
        println!("[{i}] {}", device.nickname);
    }

    loop {
        let input: String = Input::new()
            .with_prompt("Push to which device?")
            .interact_text()
            .context("Failed to read device selection")?;
        if let Some(choice) = parse_choice(&input, devices.len()) {
            return Ok(devices[choice].clone());
        }
    }
}

/// One menu answer: an index into a list of `len` devices, or `None` for
/// anything that is not a number in range.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    input.trim().parse::<usize>().ok().filter(|&i| i < len)
}

/// Read the message from standard input when none was given on the
/// command line. The whole stream up to EOF is one note.
pub fn read_message() -> Result<String> {
    println!("Enter your message: ");
    let mut message = String::new();
    std::io::stdin()
        .read_to_string(&mut message)
        .context("Failed to read message from stdin")?;
    Ok(message)
}
