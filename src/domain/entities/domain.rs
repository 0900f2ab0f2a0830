//! Domain entity representing one tenant site of the classifieds network.

use chrono::{DateTime, Utc};

/// A site host (e.g. `classifieds.example.com`) that scopes visible content.
///
/// Areas and sections are enabled per domain; everything below them is
/// visible wherever its root is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    pub id: i64,
    pub host: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Domain {
    /// Creates a new Domain instance.
    pub fn new(id: i64, host: String, is_active: bool, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            host,
            is_active,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_creation() {
        let now = Utc::now();
        let domain = Domain::new(1, "ads.example.com".to_string(), true, now);

        assert_eq!(domain.id, 1);
        assert_eq!(domain.host, "ads.example.com");
        assert!(domain.is_active);
        assert_eq!(domain.created_at, now);
    }
}
