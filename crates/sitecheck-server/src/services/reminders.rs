// SPDX-License-Identifier: Apache-2.0

//! Daily reminder generation.
//!
//! Consumes the same checklist/item data shapes as the aggregation path
//! but none of its logic: for every non-template, non-archived checklist
//! whose work date falls on the given local day, one notification is
//! built from the site name and the reduced item list. The generator does
//! not deduplicate across invocations; that policy belongs to whoever
//! schedules it.

use chrono::NaiveDate;
use sitecheck_core::time::{day_end_exclusive, day_start};
use sitecheck_core::UserId;
use sitecheck_model::{Notification, ReminderPayload, NOTIFICATION_KIND_DAILY};
use sitecheck_store::{Store, StoreError};
use tracing::info;

pub(crate) fn generate_daily(
    store: &mut Store,
    owner: UserId,
    day: NaiveDate,
) -> Result<Vec<Notification>, StoreError> {
    let start = day_start(day);
    let end = day_end_exclusive(day);
    let sources = store.reminder_sources(owner, start, end)?;

    let mut notifications = Vec::with_capacity(sources.len());
    for source in sources {
        let checklist = source.checklist;
        let payload = ReminderPayload {
            site_name: checklist.site_name.clone(),
            total_items: source.items.len() as u64,
            items: source.items,
        };
        let title = format!("Today at {}: {}", checklist.site_name, checklist.name);
        let notification = store.insert_notification(
            owner,
            checklist.id,
            NOTIFICATION_KIND_DAILY,
            &title,
            &payload,
        )?;
        notifications.push(notification);
    }
    info!(
        owner = owner.get(),
        day = %day,
        generated = notifications.len(),
        "daily reminders generated"
    );
    Ok(notifications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecheck_core::time::{encode_timestamp, now};
    use sitecheck_core::{CategoryId, ChecklistId};
    use sitecheck_model::Status;
    use sitecheck_store::{NewChecklist, NewItem};

    fn seeded_store() -> (Store, UserId) {
        let mut store = Store::open_in_memory().expect("open store");
        let user = store.upsert_user("sub-owner", "Owner").expect("user");
        (store, UserId::new(user.id).expect("user id"))
    }

    fn checklist_for_today(store: &mut Store, owner: UserId, name: &str, template: bool) -> i64 {
        store
            .create_checklist(
                owner,
                &NewChecklist {
                    name: name.to_string(),
                    description: None,
                    site_name: "North Yard".to_string(),
                    work_date: now(),
                    is_template: template,
                },
            )
            .expect("create checklist")
            .id
    }

    fn add_item(store: &mut Store, checklist: i64, owner: UserId, name: &str, qty: Option<i64>) {
        store
            .create_item(
                ChecklistId::new(checklist).expect("id"),
                owner,
                &NewItem {
                    name: name.to_string(),
                    description: None,
                    category_id: CategoryId::new(2).expect("category"),
                    quantity: qty,
                    unit: qty.map(|_| "pcs".to_string()),
                    memo: None,
                    status: Some(Status::NotStarted),
                },
            )
            .expect("create item");
    }

    #[test]
    fn generates_one_notification_per_todays_checklist() {
        let (mut store, owner) = seeded_store();
        let today_list = checklist_for_today(&mut store, owner, "Footing pour", false);
        add_item(&mut store, today_list, owner, "Rebar ties", Some(400));
        add_item(&mut store, today_list, owner, "Formwork panels", None);
        // Templates and archived checklists never produce reminders.
        let _template = checklist_for_today(&mut store, owner, "Template", true);
        let archived = checklist_for_today(&mut store, owner, "Archived", false);
        store
            .conn()
            .execute(
                "UPDATE checklists SET archived_at = ?1 WHERE id = ?2",
                rusqlite::params![encode_timestamp(now()), archived],
            )
            .expect("archive");

        let generated =
            generate_daily(&mut store, owner, sitecheck_core::time::today_local())
                .expect("generate");
        assert_eq!(generated.len(), 1);
        let notification = &generated[0];
        assert_eq!(notification.kind, NOTIFICATION_KIND_DAILY);
        assert_eq!(notification.checklist_id, today_list);
        assert_eq!(notification.message.site_name, "North Yard");
        assert_eq!(notification.message.total_items, 2);
        assert_eq!(notification.message.items[0].name, "Rebar ties");
        assert_eq!(notification.message.items[0].category_name, "Materials");
        assert_eq!(notification.message.items[0].quantity, Some(400));
        assert_eq!(
            notification.message.items[0].unit.as_deref(),
            Some("pcs")
        );
        assert!(notification.title.contains("North Yard"));
    }

    #[test]
    fn repeated_generation_appends_rather_than_deduplicates() {
        let (mut store, owner) = seeded_store();
        let today_list = checklist_for_today(&mut store, owner, "Footing pour", false);
        add_item(&mut store, today_list, owner, "Rebar ties", None);

        let day = sitecheck_core::time::today_local();
        generate_daily(&mut store, owner, day).expect("first run");
        generate_daily(&mut store, owner, day).expect("second run");

        let listed = store.list_notifications(owner).expect("list");
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn checklists_on_other_days_are_ignored() {
        let (mut store, owner) = seeded_store();
        let list = checklist_for_today(&mut store, owner, "Tomorrow's pour", false);
        let tomorrow = day_end_exclusive(sitecheck_core::time::today_local());
        store
            .conn()
            .execute(
                "UPDATE checklists SET work_date = ?1 WHERE id = ?2",
                rusqlite::params![encode_timestamp(tomorrow), list],
            )
            .expect("move work date");

        let generated =
            generate_daily(&mut store, owner, sitecheck_core::time::today_local())
                .expect("generate");
        assert!(generated.is_empty());
    }
}
