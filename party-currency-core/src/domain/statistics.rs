//! Admin dashboard statistics

use serde::{Deserialize, Serialize};

/// Totals shown on the admin dashboard (`/admin/get-admin-statistics`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStatistics {
    pub total_active_users: u64,
    pub new_active_users_this_week: u64,
    pub new_active_users_previous_week: u64,
    pub percentage_increase: f64,
    pub total_completed_transactions: u64,
    pub total_pending_transactions: u64,
    pub transactions_this_week: u64,
    pub percentage_increase_transactions: f64,
    pub total_events: u64,
    pub events_this_week: u64,
    pub percentage_increase_events: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default_to_zero() {
        let stats: AdminStatistics = serde_json::from_value(json!({
            "total_active_users": 42,
            "percentage_increase": 12.5
        }))
        .unwrap();
        assert_eq!(stats.total_active_users, 42);
        assert_eq!(stats.percentage_increase, 12.5);
        assert_eq!(stats.total_events, 0);
    }
}
