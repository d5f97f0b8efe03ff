//! CDP wire types. Only the fields jobhound reads are modelled; serde
//! ignores the rest.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing command. `sessionId` routes it to an attached page.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Incoming frame: a reply when `id` is set, otherwise an event.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Target created by `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub page_type: String,
    pub url: String,
}

/// `GET /json/version`. Chrome mixes PascalCase and camelCase here.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Root returned by `DOM.getDocument`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomNode {
    pub node_id: i64,
    #[serde(default)]
    pub child_node_count: i64,
}

/// `DOM.getBoxModel` result. `content` is a quad of x/y pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxModel {
    pub content: Vec<f64>,
    pub width: i64,
    pub height: i64,
}

/// Handle to a JS value living in the page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    pub value: Option<Value>,
    pub description: Option<String>,
    pub object_id: Option<String>,
}

/// Thrown exception attached to a `Runtime.*` reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    pub text: String,
    pub line_number: i64,
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// The thrown value's description (e.g. "TypeError: x is undefined"),
    /// else the summary text, with the script line.
    pub fn message(&self) -> String {
        let text = self
            .exception
            .as_ref()
            .and_then(|e| e.description.as_deref())
            .unwrap_or(&self.text);
        format!("{} (line {})", text, self.line_number)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    None,
    Left,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseEventType {
    MousePressed,
    MouseReleased,
    MouseMoved,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
