//! Messaging Dashboard
//!
//! Headline statistics, a week of daily activity and the most recently sent
//! template messages. All figures are mock data until a real messaging
//! backend is connected.

pub mod stats;

pub use stats::{
    format_count, ActivityStatus, DailyActivity, RecentActivity, StatCard, Summary,
};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Everything shown on the dashboard page
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: Vec<StatCard>,
    pub activity: Vec<DailyActivity>,
    pub recent: Vec<RecentActivity>,
    pub summary: Summary,
}

impl Dashboard {
    /// Build a dashboard from its parts, computing the summary
    pub fn new(
        stats: Vec<StatCard>,
        activity: Vec<DailyActivity>,
        recent: Vec<RecentActivity>,
    ) -> Self {
        let summary = Summary::from_activity(&activity);
        Self {
            stats,
            activity,
            recent,
            summary,
        }
    }

    /// Dashboard populated with mock figures, recent activity relative to `now`
    pub fn mock(now: DateTime<Utc>) -> Self {
        let stats = vec![
            StatCard::new("Messages Sent", 2543, 12.5),
            StatCard::new("Delivered", 2418, 11.8),
            StatCard::new("Read", 1892, 8.2),
            StatCard::new("Pending", 125, -3.1),
        ];

        let activity = vec![
            DailyActivity::new("Mon", 420, 398, 312),
            DailyActivity::new("Tue", 380, 365, 285),
            DailyActivity::new("Wed", 450, 428, 356),
            DailyActivity::new("Thu", 410, 392, 320),
            DailyActivity::new("Fri", 485, 461, 398),
            DailyActivity::new("Sat", 320, 305, 245),
            DailyActivity::new("Sun", 280, 269, 210),
        ];

        let recent_entry = |template: &str, customer: &str, ago: Duration, status| {
            RecentActivity {
                template: template.to_string(),
                customer: customer.to_string(),
                sent_at: now - ago,
                status,
            }
        };

        let recent = vec![
            recent_entry(
                "Order Confirmation",
                "John Doe",
                Duration::minutes(45),
                ActivityStatus::Delivered,
            ),
            recent_entry(
                "Shipping Update",
                "Jane Smith",
                Duration::hours(1),
                ActivityStatus::Read,
            ),
            recent_entry(
                "Abandoned Cart",
                "Mike Johnson",
                Duration::hours(2),
                ActivityStatus::Delivered,
            ),
            recent_entry(
                "Order Confirmation",
                "Sarah Williams",
                Duration::hours(3),
                ActivityStatus::Delivered,
            ),
        ];

        Self::new(stats, activity, recent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_dashboard() {
        let now = Utc::now();
        let dashboard = Dashboard::mock(now);

        assert_eq!(dashboard.stats.len(), 4);
        assert_eq!(dashboard.stats[0].formatted_value(), "2,543");
        assert_eq!(dashboard.activity.len(), 7);
        assert_eq!(dashboard.summary.total_sent, 2745);
        assert_eq!(dashboard.summary.pending, 2745 - 2618);
        assert_eq!(dashboard.summary.busiest_day.as_deref(), Some("Fri"));
        assert_eq!(dashboard.recent[1].status, ActivityStatus::Read);
        assert_eq!(dashboard.recent[0].sent_at, now - Duration::minutes(45));
    }
}
