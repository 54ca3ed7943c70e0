//! Audit timestamps shared by persistable entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation/update instant pair.
///
/// `created_at` is unset until the first [`touch`](Self::touch) and never
/// changes afterwards. `updated_at` never moves backwards and is never earlier
/// than `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimestamps {
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl AuditTimestamps {
    /// Rebuild timestamps read back from storage.
    pub fn from_stored(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at: Some(created_at),
            updated_at: Some(updated_at),
        }
    }

    /// Creation instant, if ever timestamped
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Last update instant, if ever timestamped
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Whether the entity has been timestamped at least once.
    pub fn is_set(&self) -> bool {
        self.created_at.is_some()
    }

    /// Stamp with the current UTC time.
    pub fn touch(&mut self) {
        self.touch_at(Utc::now());
    }

    /// Stamp with the given instant.
    ///
    /// The first call sets both fields to `now`. Later calls only move
    /// `updated_at`, clamped so it never goes backwards.
    pub fn touch_at(&mut self, now: DateTime<Utc>) {
        match self.created_at {
            None => {
                self.created_at = Some(now);
                self.updated_at = Some(now);
            }
            Some(created) => {
                let floor = self.updated_at.map_or(created, |updated| updated.max(created));
                self.updated_at = Some(now.max(floor));
            }
        }
    }
}

/// Capability of entities that carry audit timestamps.
pub trait HasAuditTimestamps {
    fn timestamps(&self) -> &AuditTimestamps;

    fn timestamps_mut(&mut self) -> &mut AuditTimestamps;

    /// Stamp before a persistence-affecting mutation.
    fn touch(&mut self) {
        self.timestamps_mut().touch();
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps().created_at()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.timestamps().updated_at()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_first_touch_sets_both() {
        let now = Utc::now();
        let mut ts = AuditTimestamps::default();
        assert!(!ts.is_set());

        ts.touch_at(now);

        assert_eq!(ts.created_at(), Some(now));
        assert_eq!(ts.updated_at(), Some(now));
    }

    #[test]
    fn test_created_at_is_immutable_after_first_touch() {
        let start = Utc::now();
        let mut ts = AuditTimestamps::default();
        ts.touch_at(start);

        for i in 1..=5 {
            ts.touch_at(start + Duration::seconds(i));
            assert_eq!(ts.created_at(), Some(start));
        }
        assert_eq!(ts.updated_at(), Some(start + Duration::seconds(5)));
    }

    #[test]
    fn test_updated_at_never_moves_backwards() {
        let start = Utc::now();
        let mut ts = AuditTimestamps::default();
        ts.touch_at(start);
        ts.touch_at(start + Duration::minutes(10));

        // Clock stepped back
        ts.touch_at(start + Duration::minutes(1));
        assert_eq!(ts.updated_at(), Some(start + Duration::minutes(10)));

        ts.touch_at(start - Duration::hours(1));
        assert_eq!(ts.updated_at(), Some(start + Duration::minutes(10)));
        assert_eq!(ts.created_at(), Some(start));
    }

    #[test]
    fn test_touch_with_wall_clock_is_monotonic() {
        let mut ts = AuditTimestamps::default();
        ts.touch();
        let created = ts.created_at();
        let mut previous = ts.updated_at();

        for _ in 0..50 {
            ts.touch();
            assert_eq!(ts.created_at(), created);
            assert!(ts.updated_at() >= previous);
            assert!(ts.updated_at() >= ts.created_at());
            previous = ts.updated_at();
        }
    }

    #[test]
    fn test_from_stored_is_set() {
        let created = Utc::now() - Duration::days(1);
        let updated = Utc::now();
        let mut ts = AuditTimestamps::from_stored(created, updated);

        assert!(ts.is_set());
        ts.touch();
        assert_eq!(ts.created_at(), Some(created));
        assert!(ts.updated_at() >= Some(updated));
    }
}
