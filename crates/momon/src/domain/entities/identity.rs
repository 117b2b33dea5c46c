//! Identity - Pseudonymous caller keyed by device id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One installation of the client app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub device_id: String,
    /// Set once on first contact
    pub first_seen_at: DateTime<Utc>,
    /// Advanced on every creation request, never moves backwards
    pub last_seen_at: DateTime<Utc>,
}

impl Identity {
    /// First contact: both timestamps are `now`
    pub fn first_contact(device_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            device_id: device_id.into(),
            first_seen_at: now,
            last_seen_at: now,
        }
    }

    /// Record another sighting
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_seen_at {
            self.last_seen_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_first_contact_sets_both_timestamps() {
        let now = Utc::now();
        let identity = Identity::first_contact("d1", now);
        assert_eq!(identity.first_seen_at, now);
        assert_eq!(identity.last_seen_at, now);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let now = Utc::now();
        let mut identity = Identity::first_contact("d1", now);

        identity.touch(now + Duration::seconds(5));
        assert_eq!(identity.last_seen_at, now + Duration::seconds(5));

        identity.touch(now);
        assert_eq!(identity.last_seen_at, now + Duration::seconds(5));
        assert_eq!(identity.first_seen_at, now);
    }
}
