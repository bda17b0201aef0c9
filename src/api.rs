// API client module: a small blocking HTTP client for the Pushbullet v2
// API. Every operation the rest of the crate needs goes through the
// `PushApi` trait so tests can substitute a fake client instead of
// hitting the live service.

use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client, Response};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Production API endpoint. Override with the `PUSHBULLET_API_URL`
/// environment variable (used by tests pointing at a local server).
const DEFAULT_API_URL: &str = "https://api.pushbullet.com";

/// A device registered on the account. The tool only ever reads these;
/// creating and renaming devices happens elsewhere.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Device {
    pub iden: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub active: bool,
}

/// Wire shape of `GET /v2/devices`.
#[derive(Debug, Deserialize)]
struct DeviceList {
    devices: Vec<Device>,
}

impl DeviceList {
    /// The listing includes tombstones for deleted devices; only active
    /// ones can receive a push.
    fn into_active(self) -> Vec<Device> {
        self.devices.into_iter().filter(|d| d.active).collect()
    }
}

/// Metadata returned by the upload handshake, echoed back verbatim in the
/// follow-up file push.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UploadInfo {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}

/// Response from `POST /v2/upload-request`: the `UploadInfo` fields plus
/// the one-shot URL the file bytes go to.
#[derive(Debug, Deserialize)]
struct UploadTicket {
    file_name: String,
    file_type: String,
    file_url: String,
    upload_url: String,
}

/// Request payload for `POST /v2/upload-request`.
#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file_name: &'a str,
    file_type: &'a str,
}

/// Request payload for `POST /v2/pushes`. One struct covers all three
/// push kinds; absent fields are omitted from the JSON entirely, which
/// also covers the "no device targeted" case (service-default routing).
#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_iden: Option<&'a str>,
}

impl<'a> PushRequest<'a> {
    fn new(kind: &'a str, device_iden: Option<&'a str>) -> Self {
        PushRequest {
            kind,
            title: None,
            body: None,
            url: None,
            file_name: None,
            file_type: None,
            file_url: None,
            device_iden,
        }
    }
}

/// The operations the push workflow needs from the remote service. Tests
/// implement this with a fake that records calls; production code uses
/// `ApiClient`.
pub trait PushApi {
    /// List the active devices on the account.
    fn devices(&self) -> Result<Vec<Device>>;

    /// Upload a local file, returning the metadata the file push refers to.
    fn upload_file(&self, path: &Path) -> Result<UploadInfo>;

    /// Push a previously uploaded file.
    fn push_file(&self, upload: &UploadInfo, device_iden: Option<&str>) -> Result<()>;

    /// Push a link; Pushbullet shows `title` and opens `url`.
    fn push_link(&self, title: &str, url: &str, device_iden: Option<&str>) -> Result<()>;

    /// Push a plain text note.
    fn push_note(&self, title: &str, body: &str, device_iden: Option<&str>) -> Result<()>;
}

/// Blocking client holding the HTTP connection pool, the API base URL and
/// the account's API key.
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: String,
}

/// Turn an API-reported failure (non-success HTTP status) into a fatal
/// error naming the operation and carrying the response payload. Applied
/// at every call site; a failed call aborts the whole run.
fn check(op: &str, res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    anyhow::bail!("{op} failed: {status} - {body}")
}

impl ApiClient {
    /// Create a client for the given API key. The base URL comes from the
    /// `PUSHBULLET_API_URL` environment variable or falls back to the
    /// production endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        let base_url =
            std::env::var("PUSHBULLET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url,
            token: api_key.to_string(),
        })
    }

    fn post_push(&self, op: &str, push: &PushRequest) -> Result<()> {
        let url = format!("{}/v2/pushes", &self.base_url);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(push)
            .send()
            .with_context(|| format!("Failed to send {op} request"))?;
        check(op, res)?;
        Ok(())
    }
}

impl PushApi for ApiClient {
    fn devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}/v2/devices", &self.base_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .context("Failed to send device list request")?;
        let list: DeviceList = check("list devices", res)?
            .json()
            .context("Parsing device list json")?;
        Ok(list.into_active())
    }

    fn upload_file(&self, path: &Path) -> Result<UploadInfo> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload.bin");
        let file_type = mime_guess::from_path(path).first_or_octet_stream();

        // Step one: ask the API where to put the bytes.
        let url = format!("{}/v2/upload-request", &self.base_url);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&UploadRequest {
                file_name,
                file_type: file_type.essence_str(),
            })
            .send()
            .context("Failed to send upload request")?;
        let ticket: UploadTicket = check("upload request", res)?
            .json()
            .context("Parsing upload ticket json")?;

        // Step two: multipart POST of the file bytes to the returned URL.
        // The upload URL is pre-authorized, so no bearer token here.
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let part = multipart::Part::reader(file)
            .file_name(ticket.file_name.clone())
            .mime_str(&ticket.file_type)
            .context("Invalid mime type for upload")?;
        let form = multipart::Form::new().part("file", part);
        let res = self
            .client
            .post(&ticket.upload_url)
            .multipart(form)
            .send()
            .context("Failed to send file upload")?;
        check("file upload", res)?;

        Ok(UploadInfo {
            file_name: ticket.file_name,
            file_type: ticket.file_type,
            file_url: ticket.file_url,
        })
    }

    fn push_file(&self, upload: &UploadInfo, device_iden: Option<&str>) -> Result<()> {
        let mut push = PushRequest::new("file", device_iden);
        push.file_name = Some(&upload.file_name);
        push.file_type = Some(&upload.file_type);
        push.file_url = Some(&upload.file_url);
        self.post_push("push file", &push)
    }

    fn push_link(&self, title: &str, url: &str, device_iden: Option<&str>) -> Result<()> {
        let mut push = PushRequest::new("link", device_iden);
        push.title = Some(title);
        push.url = Some(url);
        self.post_push("push link", &push)
    }

    fn push_note(&self, title: &str, body: &str, device_iden: Option<&str>) -> Result<()> {
        let mut push = PushRequest::new("note", device_iden);
        push.title = Some(title);
        push.body = Some(body);
        self.post_push("push note", &push)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn note_push_serializes_with_device() {
        let mut push = PushRequest::new("note", Some("dev1"));
        push.title = Some("Note");
        push.body = Some("hi");
        let value = serde_json::to_value(&push).unwrap();
        assert_eq!(
            value,
            json!({"type": "note", "title": "Note", "body": "hi", "device_iden": "dev1"})
        );
    }

    #[test]
    fn absent_device_is_omitted_not_null() {
        let mut push = PushRequest::new("note", None);
        push.title = Some("Note");
        push.body = Some("hi");
        let value = serde_json::to_value(&push).unwrap();
        assert_eq!(value, json!({"type": "note", "title": "Note", "body": "hi"}));
    }

    #[test]
    fn link_push_serializes_title_and_url() {
        let mut push = PushRequest::new("link", None);
        push.title = Some("http://example.com");
        push.url = Some("http://example.com");
        let value = serde_json::to_value(&push).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "link",
                "title": "http://example.com",
                "url": "http://example.com"
            })
        );
    }

    #[test]
    fn device_list_keeps_only_active_devices() {
        let list: DeviceList = serde_json::from_value(json!({
            "devices": [
                {"iden": "d1", "nickname": "Phone", "active": true},
                {"iden": "d2", "nickname": "Old Phone", "active": false},
                {"iden": "d3", "active": true}
            ]
        }))
        .unwrap();
        let devices = list.into_active();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].nickname, "Phone");
        // Nickname is optional on the wire; missing means empty.
        assert_eq!(devices[1].iden, "d3");
        assert_eq!(devices[1].nickname, "");
    }
}
