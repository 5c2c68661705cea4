//! Request history items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::id::EntityId;
use crate::persistence::PersistedRequest;
use crate::request::{HttpMethod, RequestTemplate};

/// One past send, as returned by the backend.
///
/// Two encodings are accepted: the request nested under `request`, or the
/// request fields inlined next to `id` (older rows).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    /// Backend identifier.
    pub id: EntityId,
    /// The request as it was sent (unresolved).
    pub request: PersistedRequest,
    /// When the send happened, if the backend reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl HistoryItem {
    /// Method shown in the history list.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.request.method().unwrap_or_default()
    }

    /// URL shown in the history list.
    #[must_use]
    pub fn url(&self) -> &str {
        self.request.url()
    }

    /// Normalizes the stored request into an editable template.
    #[must_use]
    pub fn to_template(&self) -> RequestTemplate {
        self.request.to_template()
    }
}

impl<'de> Deserialize<'de> for HistoryItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: EntityId,
            #[serde(default)]
            request: Option<PersistedRequest>,
            #[serde(default, alias = "createdAt")]
            created_at: Option<DateTime<Utc>>,
            #[serde(flatten)]
            inline: PersistedRequest,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            id: raw.id,
            request: raw.request.unwrap_or(raw.inline),
            created_at: raw.created_at,
        })
    }
}
