//! Audit log entries.

use crate::ids::AuditEntryId;
use crate::search::{FieldValue, Record};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// One recorded user action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub timestamp: NaiveDateTime,
    /// Display name of the acting user.
    pub user: String,
    pub role: String,
    /// Machine name of the action (e.g. "sale_created").
    pub action: String,
    pub description: String,
    pub ip_address: String,
    #[serde(default)]
    pub severity: Severity,
}

impl AuditEntry {
    pub fn happened_on(&self, day: NaiveDate) -> bool {
        self.timestamp.date() == day
    }
}

impl Record for AuditEntry {
    const SEARCH_FIELDS: &'static [&'static str] = &["user", "description", "ip_address"];
    const FILTER_FIELDS: &'static [&'static str] = &["action", "user"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "timestamp" => Some(self.timestamp.into()),
            "user" => Some(FieldValue::text(&self.user)),
            "role" => Some(FieldValue::text(&self.role)),
            "action" => Some(FieldValue::text(&self.action)),
            "description" => Some(FieldValue::text(&self.description)),
            "ip_address" => Some(FieldValue::text(&self.ip_address)),
            "severity" => Some(FieldValue::text(self.severity.as_str())),
            _ => None,
        }
    }
}

/// Counts shown above the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuditStats {
    pub total: usize,
    pub today: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl AuditStats {
    pub fn collect(entries: &[AuditEntry], today: NaiveDate) -> Self {
        entries.iter().fold(
            AuditStats {
                total: entries.len(),
                ..Default::default()
            },
            |mut stats, e| {
                if e.happened_on(today) {
                    stats.today += 1;
                }
                match e.severity {
                    Severity::Error => stats.errors += 1,
                    Severity::Warning => stats.warnings += 1,
                    Severity::Info => {}
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: &str, severity: Severity) -> AuditEntry {
        AuditEntry {
            id: AuditEntryId::generate(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap(),
            user: "María García".into(),
            role: "cashier".into(),
            action: "sale_created".into(),
            description: "Venta registrada".into(),
            ip_address: "192.168.1.101".into(),
            severity,
        }
    }

    #[test]
    fn test_stats() {
        let entries = vec![
            entry("2025-10-02 10:35:12", Severity::Info),
            entry("2025-10-02 11:15:30", Severity::Warning),
            entry("2025-10-01 09:00:00", Severity::Error),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        let stats = AuditStats::collect(&entries, today);
        assert_eq!(
            stats,
            AuditStats {
                total: 3,
                today: 2,
                errors: 1,
                warnings: 1
            }
        );
    }

    #[test]
    fn test_timestamp_field_is_searchable_text() {
        let e = entry("2025-10-02 10:35:12", Severity::Info);
        assert_eq!(
            e.field("timestamp").map(|v| v.to_string()),
            Some("2025-10-02 10:35:12".into())
        );
    }
}
