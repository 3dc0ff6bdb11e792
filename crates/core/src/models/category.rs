//! Product categories.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
