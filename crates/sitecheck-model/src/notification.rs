// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NOTIFICATION_KIND_DAILY: &str = "daily_reminder";

/// Reminder record created by the daily generator. Read-only afterward
/// except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub checklist_id: i64,
    pub kind: String,
    pub title: String,
    pub message: ReminderPayload,
    pub created_at: DateTime<Utc>,
}

/// Message payload of a daily reminder. This is the collaborator-facing
/// content shape; delivery is someone else's problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload {
    pub site_name: String,
    pub total_items: u64,
    pub items: Vec<ReminderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderItem {
    pub name: String,
    pub category_name: String,
    pub quantity: Option<i64>,
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_payload_wire_shape() {
        let payload = ReminderPayload {
            site_name: "North Yard".to_string(),
            total_items: 2,
            items: vec![ReminderItem {
                name: "Rebar ties".to_string(),
                category_name: "Materials".to_string(),
                quantity: Some(400),
                unit: Some("pcs".to_string()),
            }],
        };
        let value = serde_json::to_value(&payload).expect("serialize payload");
        assert_eq!(value["siteName"], "North Yard");
        assert_eq!(value["totalItems"], 2);
        assert_eq!(value["items"][0]["categoryName"], "Materials");
        let back: ReminderPayload = serde_json::from_value(value).expect("deserialize payload");
        assert_eq!(back, payload);
    }
}
