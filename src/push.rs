// Dispatch: one classified message becomes one push call, or two calls
// for a file (upload handshake, then the push referencing the upload).
// Any API-reported failure aborts the run; a file push that fails after
// a successful upload is not rolled back.

use anyhow::Result;
use std::path::Path;

use crate::api::{Device, PushApi};
use crate::content::ContentKind;

/// Send `content` as a push of the given kind, routed to `device` when
/// one was resolved and to the service default otherwise.
pub fn push(api: &impl PushApi, device: Option<&Device>, content: &str, kind: ContentKind) -> Result<()> {
    let device_iden = device.map(|d| d.iden.as_str());
    match kind {
        ContentKind::File => {
            let upload = api.upload_file(Path::new(content))?;
            api.push_file(&upload, device_iden)
        }
        ContentKind::Link => api.push_link(content, content, device_iden),
        ContentKind::Note => api.push_note("Note", content, device_iden),
    }
}
