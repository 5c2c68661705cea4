//! Collections of saved requests

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::persistence::PersistedRequest;
use crate::request::{HttpMethod, RequestTemplate};

/// A named folder of saved requests. Deleting it deletes its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Backend identifier.
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// A request saved into a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionItem {
    /// Backend identifier.
    pub id: EntityId,
    /// Owning collection, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<EntityId>,
    /// The saved request.
    #[serde(default)]
    pub request: PersistedRequest,
}

impl CollectionItem {
    /// Method shown in the item list.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.request.method().unwrap_or_default()
    }

    /// URL shown in the item list.
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
