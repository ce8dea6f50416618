//! Switchboard demo
//!
//! Walks through templates, chat and the dashboard against local storage,
//! without starting the HTTP server.

use std::sync::Arc;
use switchboard::chat::{AutoResponder, ChatSession, SharedSession};
use switchboard::config::Config;
use switchboard::dashboard::Dashboard;
use switchboard::storage::{FileStore, KeyValueStore, MemoryStore};
use switchboard::template::{RenderContext, TemplateStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter_directive()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Switchboard v{}", env!("CARGO_PKG_VERSION"));

    let storage: Arc<dyn KeyValueStore> = if config.storage.in_memory {
        Arc::new(MemoryStore::new())
    } else {
        let store = FileStore::open(config.storage.data_path())?;
        tracing::info!("Data directory: {:?}", store.data_dir());
        Arc::new(store)
    };

    demo_templates(Arc::clone(&storage))?;
    demo_chat(&config).await?;
    demo_dashboard();

    tracing::info!("Switchboard demo complete");
    Ok(())
}

fn demo_templates(storage: Arc<dyn KeyValueStore>) -> Result<(), Box<dyn std::error::Error>> {
    let store = TemplateStore::load(storage)?;
    tracing::info!("Loaded {} templates", store.len());

    for template in store.list() {
        // Fill every placeholder except the last, to show what stays verbatim
        let mut values = RenderContext::new();
        let names = template.distinct_variables();
        for name in names.iter().take(names.len().saturating_sub(1)) {
            values.set(name.as_str(), format!("<{}>", name));
        }

        let preview = store.preview(&template.id, &values)?;
        println!("[{}] {}", preview.title, preview.rendered);
        if !preview.unresolved.is_empty() {
            println!("    unresolved: {}", preview.unresolved.join(", "));
        }
    }

    Ok(())
}

async fn demo_chat(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session: SharedSession = Arc::new(tokio::sync::RwLock::new(ChatSession::with_fixtures(
        chrono::Utc::now(),
    )));
    let responder = AutoResponder::new(
        config.chat.auto_reply_delay(),
        config.chat.auto_reply_text.clone(),
    );

    let sent = session.write().await.send("2", "Your order is on its way!")?;
    println!("you -> Jane Smith: {} ({})", sent.text, sent.formatted_time());

    if let Some(reply) = responder.schedule(Arc::clone(&session), "2").join().await {
        println!("Jane Smith -> you: {} ({})", reply.text, reply.formatted_time());
    }

    let guard = session.read().await;
    for contact in guard.contacts() {
        println!("{:<16} unread: {}", contact.name, contact.unread);
    }

    Ok(())
}

fn demo_dashboard() {
    let dashboard = Dashboard::mock(chrono::Utc::now());

    for card in &dashboard.stats {
        println!(
            "{:<14} {:>8} {:>7}",
            card.title,
            card.formatted_value(),
            card.formatted_change()
        );
    }

    let summary = &dashboard.summary;
    println!(
        "Week: {} sent, {:.1}% delivered, {:.1}% read",
        summary.total_sent, summary.delivery_rate, summary.read_rate
    );
}
