//! Announcement bar messages.

use serde::{Deserialize, Serialize};

use crate::types::BannerId;

/// A row from the `banner_messages` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerMessage {
    pub id: BannerId,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl BannerMessage {
    /// Keep active banners, ordered for display.
    #[must_use]
    pub fn active_in_order(mut banners: Vec<Self>) -> Vec<Self> {
        banners.retain(|b| b.is_active);
        banners.sort_by_key(|b| (b.display_order, b.id));
        banners
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(id: i64, order: i32, active: bool) -> BannerMessage {
        BannerMessage {
            id: BannerId::new(id),
            message: format!("banner {id}"),
            link: None,
            is_active: active,
            display_order: order,
        }
    }

    #[test]
    fn test_active_in_order() {
        let banners = vec![banner(1, 2, true), banner(2, 1, false), banner(3, 1, true)];
        let ids: Vec<i64> = BannerMessage::active_in_order(banners)
            .iter()
            .map(|b| b.id.as_i64())
            .collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
