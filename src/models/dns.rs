// Pi-hole summary counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsFilterStats {
    pub queries_today: i64,
    pub ads_blocked_today: i64,
    /// Rounded to 2 decimals.
    pub ads_percentage_today: f64,
    /// Negative when gravity.db is missing or unreadable (-1 / -2).
    pub domains_being_blocked: i64,
    pub queries_forwarded: i64,
    pub queries_cached: i64,
    pub unique_clients: i64,
}
