//! IONOS Cloud DNS resources
//!
//! Wire types mirror the provider's collection/resource envelopes
//! (`items[].{id, metadata, properties}`); the flattened [`Zone`] and
//! [`Record`] types are what the rest of the crate works with.

use serde::Deserialize;

/// Provisioning state of a zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneState {
    /// Zone is deployed and answering queries
    Available,
    /// Any other provider state (PROVISIONING, UPDATING, FAILED, ...)
    Other(String),
}

impl ZoneState {
    fn from_wire(state: Option<String>) -> Self {
        match state {
            Some(s) if s == "AVAILABLE" => Self::Available,
            Some(s) => Self::Other(s),
            None => Self::Other("UNKNOWN".to_string()),
        }
    }
}

impl std::fmt::Display for ZoneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("AVAILABLE"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// A DNS zone hosted by IONOS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Provider-assigned zone id
    pub id: String,
    /// Zone name, e.g. `example.com`
    pub name: String,
    /// Provisioning state
    pub state: ZoneState,
}

/// A DNS record as listed by the structured API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Provider-assigned record id
    pub id: String,
    /// Record type, e.g. `TXT`
    pub record_type: String,
    /// Label relative to the zone, e.g. `_acme-challenge`
    pub name: String,
    /// Record content, compared verbatim
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ZoneRead {
    pub id: String,
    #[serde(default)]
    pub metadata: ZoneMetadata,
    #[serde(default)]
    pub properties: ZoneProperties,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ZoneMetadata {
    pub state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ZoneProperties {
    #[serde(default)]
    pub zone_name: String,
}

impl From<ZoneRead> for Zone {
    fn from(wire: ZoneRead) -> Self {
        Self {
            id: wire.id,
            name: wire.properties.zone_name,
            state: ZoneState::from_wire(wire.metadata.state),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordRead {
    pub id: String,
    #[serde(default)]
    pub properties: RecordProperties,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecordProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
}

impl From<RecordRead> for Record {
    fn from(wire: RecordRead) -> Self {
        Self {
            id: wire.id,
            record_type: wire.properties.record_type,
            name: wire.properties.name,
            content: wire.properties.content,
        }
    }
}
