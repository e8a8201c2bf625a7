//! Basic types shared by the controller and its host

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Numeric record identifier assigned by the records API
pub type RecordId = i64;

/// Resource type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Farmers,
    Crops,
    Markets,
    Transactions,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Farmers,
        ResourceKind::Crops,
        ResourceKind::Markets,
        ResourceKind::Transactions,
    ];

    /// Collection name, also the page path and API segment
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Farmers => "farmers",
            ResourceKind::Crops => "crops",
            ResourceKind::Markets => "markets",
            ResourceKind::Transactions => "transactions",
        }
    }

    /// Lowercase singular ("farmer")
    pub fn singular(&self) -> &'static str {
        agriweb_utils::singularize(self.collection())
    }

    /// Capitalized singular used in modal titles ("Farmer")
    pub fn singular_title(&self) -> String {
        agriweb_utils::capitalize(self.singular())
    }

    /// Collection endpoint path
    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.collection())
    }

    /// Single record endpoint path
    pub fn record_path(&self, id: RecordId) -> String {
        format!("/api/{}/{}", self.collection(), id)
    }

    /// `{id, name}` lookup list path
    pub fn lookup_list_path(&self) -> String {
        format!("/api/{}-list", self.collection())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "farmers" => Ok(ResourceKind::Farmers),
            "crops" => Ok(ResourceKind::Crops),
            "markets" => Ok(ResourceKind::Markets),
            "transactions" => Ok(ResourceKind::Transactions),
            _ => Err(CoreError::UnknownResource { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection())
    }
}

/// Status message flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::Success => write!(f, "success"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}
