// Library root
// ------------
// The `pb` binary (`main.rs`) is a thin shell around these modules so the
// push workflow can be exercised in tests without a terminal or a live
// Pushbullet account.
//
// Module responsibilities:
// - `cli`: Command-line argument definitions (message words plus the
//   mutually exclusive device-selection flags).
// - `keys`: Reads the cached API key from `~/.pushbulletkey`, or prompts
//   for one on first run and persists it with owner-only permissions.
// - `api`: Blocking HTTP client for the Pushbullet v2 API, plus the
//   `PushApi` trait that test fakes implement.
// - `device`: Picks the target device (broadcast, interactive, by name,
//   or service default) from the account's device list.
// - `content`: Classifies the message as a file path, a URL, or a note.
// - `push`: Dispatches the classified content to the right API call.
// - `ui`: Interactive terminal flows (device menu, stdin message read).
// - `app`: Wires the above into the sequential push workflow.
pub mod api;
pub mod app;
pub mod cli;
pub mod content;
pub mod device;
pub mod keys;
pub mod push;
pub mod ui;
