//! Customer profiles and payment receipts.
//!
//! Both are read shapes only. Profiles are created by the hosted backend's
//! auth hooks and receipts are reviewed in the backend's own console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{OrderId, ProfileId, ReceiptId, ReceiptStatus};

/// A row from the `profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `payment_receipts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub id: ReceiptId,
    pub order_id: OrderId,
    pub receipt_url: String,
    #[serde(default)]
    pub status: ReceiptStatus,
    pub created_at: DateTime<Utc>,
}
