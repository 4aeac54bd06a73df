use crate::error::EnvelopeError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The three routing fields of an inbound frame. Everything else in the frame,
/// `data` included, is skipped by the decoder and forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingEnvelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub target_device_id: Option<String>,
}

impl RoutingEnvelope {
    pub fn parse(raw: &str) -> Result<Self, EnvelopeError> {
        // serde accepts a JSON array for a struct; the wire format only allows objects.
        if !raw.trim_start().starts_with('{') {
            return Err(EnvelopeError::NotAnObject);
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// The sender's claimed identity, if it claimed one.
    pub fn device(&self) -> Option<&str> {
        Some(self.device_id.as_str()).filter(|id| !id.is_empty())
    }

    /// `Some` for unicast, `None` for a room broadcast.
    pub fn target(&self) -> Option<&str> {
        self.target_device_id.as_deref()
    }
}

/// Complete signaling message as clients write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl SignalMessage {
    pub fn new(kind: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            device_id: device_id.into(),
            target_device_id: None,
            data: None,
        }
    }

    pub fn to(mut self, target: impl Into<String>) -> Self {
        self.target_device_id = Some(target.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn to_json(&self) -> Result<String, EnvelopeError> {
        Ok(serde_json::to_string(self)?)
    }
}
