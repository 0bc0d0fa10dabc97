// SPDX-License-Identifier: Apache-2.0

//! DDL for the checklist store.
//!
//! Timestamps are RFC 3339 UTC text (see `sitecheck_core::time`); the
//! `status` columns carry a CHECK over the closed enum, and items enforce
//! the completion-timestamp invariant at the schema level as well as in
//! the updater.

pub const MIGRATION_V1_SQL: &str = "
CREATE TABLE IF NOT EXISTS users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  subject TEXT NOT NULL UNIQUE,
  name TEXT NOT NULL,
  role TEXT NOT NULL DEFAULT 'user',
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE,
  description TEXT,
  display_order INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS checklists (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL,
  description TEXT,
  site_name TEXT NOT NULL,
  work_date TEXT NOT NULL,
  is_template INTEGER NOT NULL DEFAULT 0,
  archived_at TEXT,
  status TEXT NOT NULL DEFAULT 'NotStarted'
    CHECK (status IN ('NotStarted', 'Pending', 'Completed')),
  user_id INTEGER NOT NULL REFERENCES users(id),
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL,
  last_viewed_at TEXT,
  name_search TEXT NOT NULL,
  site_search TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS checklist_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  checklist_id INTEGER NOT NULL REFERENCES checklists(id),
  category_id INTEGER NOT NULL REFERENCES categories(id),
  name TEXT NOT NULL,
  description TEXT,
  quantity INTEGER,
  unit TEXT,
  memo TEXT,
  status TEXT NOT NULL DEFAULT 'NotStarted'
    CHECK (status IN ('NotStarted', 'Pending', 'Completed')),
  completed_at TEXT,
  user_id INTEGER NOT NULL REFERENCES users(id),
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL,
  CHECK ((status = 'Completed') = (completed_at IS NOT NULL))
);

CREATE TABLE IF NOT EXISTS notifications (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id INTEGER NOT NULL REFERENCES users(id),
  checklist_id INTEGER NOT NULL REFERENCES checklists(id),
  kind TEXT NOT NULL,
  title TEXT NOT NULL,
  message TEXT NOT NULL,
  created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_checklists_user ON checklists(user_id);
CREATE INDEX IF NOT EXISTS idx_checklists_status ON checklists(status);
CREATE INDEX IF NOT EXISTS idx_checklists_work_date ON checklists(work_date);
CREATE INDEX IF NOT EXISTS idx_checklists_archived_at ON checklists(archived_at);
CREATE INDEX IF NOT EXISTS idx_checklists_created_at ON checklists(created_at);
CREATE INDEX IF NOT EXISTS idx_checklists_updated_at ON checklists(updated_at);
CREATE INDEX IF NOT EXISTS idx_checklists_last_viewed_at ON checklists(last_viewed_at);
CREATE INDEX IF NOT EXISTS idx_checklist_items_checklist ON checklist_items(checklist_id);
CREATE INDEX IF NOT EXISTS idx_checklist_items_category ON checklist_items(category_id);
CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id);
CREATE INDEX IF NOT EXISTS idx_notifications_created_at ON notifications(created_at);
";

pub const REQUIRED_TABLES: [&str; 5] = [
    "users",
    "categories",
    "checklists",
    "checklist_items",
    "notifications",
];

pub const REQUIRED_INDEXES: [&str; 11] = [
    "idx_checklists_user",
    "idx_checklists_status",
    "idx_checklists_work_date",
    "idx_checklists_archived_at",
    "idx_checklists_created_at",
    "idx_checklists_updated_at",
    "idx_checklists_last_viewed_at",
    "idx_checklist_items_checklist",
    "idx_checklist_items_category",
    "idx_notifications_user",
    "idx_notifications_created_at",
];
