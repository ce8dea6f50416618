//! Mock contacts and conversations shown before any real traffic exists

use crate::chat::types::{Contact, Message, Sender};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

pub fn mock_contacts(now: DateTime<Utc>) -> Vec<Contact> {
    vec![
        Contact::new("1", "John Doe", "Thank you so much!", now - Duration::minutes(2)).unread(2),
        Contact::new("2", "Jane Smith", "When will it arrive?", now - Duration::minutes(15)),
        Contact::new("3", "Mike Johnson", "I'd like to place an order", now - Duration::hours(1))
            .unread(1),
        Contact::new("4", "Sarah Williams", "Perfect, thanks!", now - Duration::hours(2)),
        Contact::new("5", "Alex Brown", "Can I change my address?", now - Duration::hours(3)),
    ]
}

pub fn mock_transcripts(now: DateTime<Utc>) -> HashMap<String, Vec<Message>> {
    let at = |minutes: i64| now - Duration::minutes(minutes);

    let mut transcripts = HashMap::new();
    transcripts.insert(
        "1".to_string(),
        vec![
            Message::new("Hi! I'd like to know about my order status.", Sender::Customer, at(5))
                .with_id("1"),
            Message::new(
                "Hello! I'll check that for you right away. Can you provide your order number?",
                Sender::User,
                at(4),
            )
            .with_id("2"),
            Message::new("Sure, it's #12345", Sender::Customer, at(3)).with_id("3"),
            Message::new(
                "Thank you! Your order has been shipped and should arrive by tomorrow. Here's your tracking number: TRK123456789",
                Sender::User,
                at(2),
            )
            .with_id("4"),
            Message::new("Perfect, thank you so much!", Sender::Customer, at(1)).with_id("5"),
        ],
    );
    transcripts.insert(
        "2".to_string(),
        vec![Message::new(
            "Hi, I ordered yesterday. When will it arrive?",
            Sender::Customer,
            at(15),
        )
        .with_id("1")],
    );
    transcripts.insert(
        "3".to_string(),
        vec![Message::new(
            "Hello! I'd like to place an order for 3 items.",
            Sender::Customer,
            at(60),
        )
        .with_id("1")],
    );
    transcripts
}
