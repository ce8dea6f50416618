//! Dashboard statistics types
//!
//! - `DailyActivity`: messages sent, delivered and read on one day
//! - `StatCard`: a headline number with its week-over-week change
//! - `RecentActivity`: one recently sent template message
//! - `Summary`: totals and rates computed from daily activity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message counts for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// Short day label, e.g. "Mon"
    pub day: String,
    pub sent: u64,
    pub delivered: u64,
    pub read: u64,
}

impl DailyActivity {
    pub fn new(day: impl Into<String>, sent: u64, delivered: u64, read: u64) -> Self {
        Self {
            day: day.into(),
            sent,
            delivered,
            read,
        }
    }
}

/// Headline statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: u64,
    /// Change from the previous period, in percent
    pub change_percent: f64,
}

impl StatCard {
    pub fn new(title: impl Into<String>, value: u64, change_percent: f64) -> Self {
        Self {
            title: title.into(),
            value,
            change_percent,
        }
    }

    /// Value with thousands separators, e.g. "2,543"
    pub fn formatted_value(&self) -> String {
        format_count(self.value)
    }

    /// Signed change with one decimal, e.g. "+12.5%"
    pub fn formatted_change(&self) -> String {
        format!("{:+.1}%", self.change_percent)
    }
}

/// Delivery state of a sent message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Delivered,
    Read,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityStatus::Delivered => write!(f, "Delivered"),
            ActivityStatus::Read => write!(f, "Read"),
        }
    }
}

/// A template message recently sent to a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub template: String,
    pub customer: String,
    pub sent_at: DateTime<Utc>,
    pub status: ActivityStatus,
}

/// Aggregates over a run of daily activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_sent: u64,
    pub total_delivered: u64,
    pub total_read: u64,
    /// Sent but not yet delivered
    pub pending: u64,
    /// Delivered / sent, 0 when nothing was sent
    pub delivery_rate: f64,
    /// Read / delivered, 0 when nothing was delivered
    pub read_rate: f64,
    /// Day with the most messages sent; the earliest wins ties
    pub busiest_day: Option<String>,
}

impl Summary {
    pub fn from_activity(days: &[DailyActivity]) -> Self {
        let total_sent: u64 = days.iter().map(|d| d.sent).sum();
        let total_delivered: u64 = days.iter().map(|d| d.delivered).sum();
        let total_read: u64 = days.iter().map(|d| d.read).sum();

        let mut busiest: Option<&DailyActivity> = None;
        for day in days {
            if busiest.map_or(true, |b| day.sent > b.sent) {
                busiest = Some(day);
            }
        }

        Self {
            total_sent,
            total_delivered,
            total_read,
            pending: total_sent.saturating_sub(total_delivered),
            delivery_rate: ratio(total_delivered, total_sent),
            read_rate: ratio(total_read, total_delivered),
            busiest_day: busiest.map(|d| d.day.clone()),
        }
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Format a count with comma thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(125), "125");
        assert_eq!(format_count(2543), "2,543");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_stat_card_formatting() {
        let card = StatCard::new("Pending", 125, -3.1);
        assert_eq!(card.formatted_value(), "125");
        assert_eq!(card.formatted_change(), "-3.1%");

        let card = StatCard::new("Messages Sent", 2543, 12.5);
        assert_eq!(card.formatted_change(), "+12.5%");
    }

    #[test]
    fn test_summary() {
        let days = vec![
            DailyActivity::new("Mon", 100, 90, 45),
            DailyActivity::new("Tue", 200, 150, 75),
            DailyActivity::new("Wed", 200, 200, 100),
        ];
        let summary = Summary::from_activity(&days);

        assert_eq!(summary.total_sent, 500);
        assert_eq!(summary.total_delivered, 440);
        assert_eq!(summary.total_read, 220);
        assert_eq!(summary.pending, 60);
        assert!((summary.delivery_rate - 0.88).abs() < 1e-9);
        assert!((summary.read_rate - 0.5).abs() < 1e-9);
        assert_eq!(summary.busiest_day.as_deref(), Some("Tue"));
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_activity(&[]);
        assert_eq!(summary.total_sent, 0);
        assert_eq!(summary.delivery_rate, 0.0);
        assert_eq!(summary.read_rate, 0.0);
        assert!(summary.busiest_day.is_none());
    }
}
