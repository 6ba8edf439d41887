use std::time::Duration;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("network support is disabled in this build")]
    Disabled,
}

#[cfg(feature = "network")]
fn client(timeout: Duration) -> Result<reqwest::blocking::Client, HttpError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HttpError::Transport {
            url: String::new(),
            message: e.to_string(),
        })
}

#[cfg(feature = "network")]
fn read_body(url: &str, response: reqwest::blocking::Response) -> Result<String, HttpError> {
    let status = response.status();
    if !status.is_success() {
        return Err(HttpError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(|e| HttpError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })
}

#[cfg(feature = "network")]
pub fn get_text(url: &str, timeout: Duration) -> Result<String, HttpError> {
    let response = client(timeout)?
        .get(url)
        .send()
        .map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    read_body(url, response)
}

#[cfg(feature = "network")]
pub fn post_json<B: Serialize>(url: &str, body: &B, timeout: Duration) -> Result<String, HttpError> {
    let payload = serde_json::to_string(body)?;
    let response = client(timeout)?
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
    read_body(url, response)
}

#[cfg(not(feature = "network"))]
pub fn get_text(_url: &str, _timeout: Duration) -> Result<String, HttpError> {
    Err(HttpError::Disabled)
}

#[cfg(not(feature = "network"))]
pub fn post_json<B: Serialize>(
    _url: &str,
    _body: &B,
    _timeout: Duration,
) -> Result<String, HttpError> {
    Err(HttpError::Disabled)
}
