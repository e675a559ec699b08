//! Wire types for the DevTools socket and its HTTP discovery endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command frame written to the socket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingFrame<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// A frame read from the socket: a reply when `id` is set, otherwise an event.
#[derive(Debug, Deserialize)]
pub struct IncomingFrame {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<FrameError>,
}

#[derive(Debug, Deserialize)]
pub struct FrameError {
    pub code: i64,
    pub message: String,
}

/// `GET /json/version`. Chrome spells most of these keys in PascalCase.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub socket_url: String,
}

/// `PUT /json/new`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTarget {
    pub id: String,
    #[serde(default)]
    pub url: String,
}

/// Content quad of `DOM.getBoxModel`; the border, padding and margin quads
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxModel {
    pub content: Vec<f64>,
}

impl BoxModel {
    /// Midpoint of the content quad, `None` if Chrome sent a short quad.
    pub fn center(&self) -> Option<(f64, f64)> {
        let q = self.content.get(..8)?;
        let x = (q[0] + q[2] + q[4] + q[6]) / 4.0;
        let y = (q[1] + q[3] + q[5] + q[7]) / 4.0;
        Some((x, y))
    }
}

/// Runtime remote object, as much of it as node lookups need.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    pub object_id: Option<String>,
}

impl RemoteObject {
    /// The object id when this is a live node rather than `null`/`undefined`.
    pub fn into_node_id(self) -> Option<String> {
        match (self.kind.as_str(), self.subtype.as_deref()) {
            ("object", Some("null")) => None,
            ("object", _) => self.object_id,
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
