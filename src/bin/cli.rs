//! Switchboard CLI
//!
//! Command-line client for a running Switchboard API server:
//! - Manage and preview message templates
//! - Configure the messaging API connection
//! - Read and send chat messages
//! - Show dashboard statistics

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use switchboard::api::dto::{ExtractResponse, TemplateListResponse};
use switchboard::template::Template;

#[derive(Parser)]
#[command(name = "switchboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Business messaging dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8090", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server status
    Status,

    /// Manage message templates
    #[command(subcommand)]
    Templates(TemplateCommand),

    /// Manage the messaging API connection
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Contacts and conversations
    #[command(subcommand)]
    Chat(ChatCommand),

    /// Show messaging statistics
    Dashboard,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommand {
    /// List all templates
    List,
    /// Show one template
    Show { id: String },
    /// Create a template
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        message: String,
    },
    /// Delete a template
    Delete { id: String },
    /// Render a template with values
    Preview {
        id: String,
        /// Values in name=value format
        #[arg(short = 's', long = "set")]
        values: Vec<String>,
    },
    /// List the placeholders in a message
    Extract { message: String },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Show connection status and masked credentials
    Show,
    /// Save credentials
    Save(CredentialArgs),
    /// Verify credentials, then save them
    Test(CredentialArgs),
    /// Disconnect and clear credentials
    Disconnect,
}

#[derive(Args)]
pub struct CredentialArgs {
    #[arg(long)]
    api_key: String,
    #[arg(long)]
    phone_number_id: String,
    #[arg(long)]
    access_token: String,
    #[arg(long, default_value = "")]
    business_account_id: String,
    #[arg(long, default_value = "")]
    webhook_url: String,
}

impl CredentialArgs {
    fn to_json(&self) -> Value {
        serde_json::json!({
            "api_key": self.api_key,
            "phone_number_id": self.phone_number_id,
            "business_account_id": self.business_account_id,
            "webhook_url": self.webhook_url,
            "access_token": self.access_token,
        })
    }
}

#[derive(Subcommand)]
pub enum ChatCommand {
    /// List contacts
    Contacts {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show the conversation with a contact
    Messages { contact_id: String },
    /// Send a message to a contact
    Send { contact_id: String, text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new(&cli.api_url, &cli.format);

    match cli.command {
        Commands::Status => client.status().await?,
        Commands::Templates(cmd) => client.templates(cmd).await?,
        Commands::Settings(cmd) => client.settings(cmd).await?,
        Commands::Chat(cmd) => client.chat(cmd).await?,
        Commands::Dashboard => client.dashboard().await?,
        Commands::Config { output } => {
            let config = switchboard::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

struct Client {
    http: reqwest::Client,
    base: String,
    json: bool,
}

impl Client {
    fn new(api_url: &str, format: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: api_url.trim_end_matches('/').to_string(),
            json: format.eq_ignore_ascii_case("json"),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Print raw JSON when requested; returns true if it did
    fn print_json(&self, value: &Value) -> anyhow::Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }

    async fn status(&self) -> anyhow::Result<()> {
        let response = self.http.get(self.url("/health")).send().await;

        let health: Value = match response {
            Ok(resp) if resp.status().is_success() => resp.json().await?,
            Ok(resp) => bail!("API returned error: {}", resp.status()),
            Err(e) => {
                eprintln!("Cannot connect to Switchboard API at {}", self.base);
                eprintln!();
                eprintln!("Make sure the Switchboard API server is running:");
                eprintln!("  cargo run --bin switchboard-api");
                return Err(e.into());
            }
        };

        if self.print_json(&health)? {
            return Ok(());
        }

        println!("Switchboard v{}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
        println!("Storage:    {}", health["storage"].as_str().unwrap_or("unknown"));
        println!("Templates:  {}", health["templates"].as_u64().unwrap_or(0));
        println!(
            "Messaging:  {}",
            if health["api_connected"].as_bool().unwrap_or(false) {
                "connected"
            } else {
                "not connected"
            }
        );

        if let Some(uptime) = health["uptime_seconds"].as_u64() {
            println!();
            println!("Uptime: {}", format_duration(uptime));
        }

        Ok(())
    }

    async fn templates(&self, cmd: TemplateCommand) -> anyhow::Result<()> {
        match cmd {
            TemplateCommand::List => {
                let value = expect_json(self.http.get(self.url("/api/v1/templates")).send().await?).await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let list: TemplateListResponse = serde_json::from_value(value)?;
                if list.templates.is_empty() {
                    println!("No templates yet.");
                    println!();
                    println!("Create one with:");
                    println!("  switchboard-cli templates create -t Welcome -m \"Hi {{{{name}}}}!\"");
                    return Ok(());
                }

                println!("{:<38} {:<24} {}", "ID", "Title", "Variables");
                println!("{}", "-".repeat(80));
                for t in &list.templates {
                    println!("{:<38} {:<24} {}", t.id, t.title, t.distinct_variables().join(", "));
                }
            }

            TemplateCommand::Show { id } => {
                let value = expect_json(
                    self.http
                        .get(self.url(&format!("/api/v1/templates/{}", id)))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let template: Template = serde_json::from_value(value)?;
                print_template(&template);
            }

            TemplateCommand::Create { title, message } => {
                let value = expect_json(
                    self.http
                        .post(self.url("/api/v1/templates"))
                        .json(&serde_json::json!({ "title": title, "message": message }))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let template: Template = serde_json::from_value(value)?;
                println!("Created template {}", template.id);
                print_template(&template);
            }

            TemplateCommand::Delete { id } => {
                expect_success(
                    self.http
                        .delete(self.url(&format!("/api/v1/templates/{}", id)))
                        .send()
                        .await?,
                )
                .await?;
                println!("Deleted template {}", id);
            }

            TemplateCommand::Preview { id, values } => {
                let values = parse_pairs(&values)?;
                let value = expect_json(
                    self.http
                        .post(self.url(&format!("/api/v1/templates/{}/preview", id)))
                        .json(&serde_json::json!({ "values": values }))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                println!("{}", value["rendered"].as_str().unwrap_or_default());
                let unresolved = string_list(&value["unresolved"]);
                if !unresolved.is_empty() {
                    println!();
                    println!("Unresolved: {}", unresolved.join(", "));
                }
            }

            TemplateCommand::Extract { message } => {
                let value = expect_json(
                    self.http
                        .post(self.url("/api/v1/templates/extract"))
                        .json(&serde_json::json!({ "message": message }))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let extracted: ExtractResponse = serde_json::from_value(value)?;
                if extracted.variables.is_empty() {
                    println!("No variables found.");
                } else {
                    for name in &extracted.distinct {
                        let count = extracted.variables.iter().filter(|v| *v == name).count();
                        println!("{:<24} x{}", name, count);
                    }
                }
            }
        }

        Ok(())
    }

    async fn settings(&self, cmd: SettingsCommand) -> anyhow::Result<()> {
        let request = match &cmd {
            SettingsCommand::Show => self.http.get(self.url("/api/v1/settings")),
            SettingsCommand::Save(args) => self
                .http
                .put(self.url("/api/v1/settings"))
                .json(&args.to_json()),
            SettingsCommand::Test(args) => {
                println!("Testing connection...");
                self.http
                    .post(self.url("/api/v1/settings/test"))
                    .json(&args.to_json())
            }
            SettingsCommand::Disconnect => {
                expect_success(self.http.delete(self.url("/api/v1/settings")).send().await?)
                    .await?;
                println!("Disconnected.");
                return Ok(());
            }
        };

        let value = expect_json(request.send().await?).await?;
        if self.print_json(&value)? {
            return Ok(());
        }

        let status = &value["status"];
        match status["state"].as_str() {
            Some("connected") => println!(
                "Connected since {}",
                status["since"].as_str().unwrap_or("unknown")
            ),
            _ => println!("Not connected"),
        }

        if let Some(creds) = value["credentials"].as_object() {
            println!();
            for (field, secret) in creds {
                println!("  {:<22} {}", field, secret.as_str().unwrap_or("-"));
            }
        }

        if let Some(prefs) = value["notifications"].as_object() {
            println!();
            println!("Notifications:");
            for (kind, enabled) in prefs {
                let state = if enabled.as_bool().unwrap_or(false) { "on" } else { "off" };
                println!("  {:<22} {}", kind, state);
            }
        }

        Ok(())
    }

    async fn chat(&self, cmd: ChatCommand) -> anyhow::Result<()> {
        match cmd {
            ChatCommand::Contacts { search } => {
                let mut request = self.http.get(self.url("/api/v1/chat/contacts"));
                if let Some(search) = &search {
                    request = request.query(&[("search", search)]);
                }

                let value = expect_json(request.send().await?).await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let selected = value["selected"].as_str();
                println!("{:<4} {:<18} {:<8} {:<10} {}", "ID", "Name", "Unread", "Seen", "Last message");
                println!("{}", "-".repeat(80));
                for contact in value["contacts"].as_array().into_iter().flatten() {
                    let id = contact["id"].as_str().unwrap_or("-");
                    let marker = if Some(id) == selected { "*" } else { " " };
                    println!(
                        "{}{:<3} {:<18} {:<8} {:<10} {}",
                        marker,
                        id,
                        contact["name"].as_str().unwrap_or("-"),
                        contact["unread"].as_u64().unwrap_or(0),
                        contact["last_seen"].as_str().unwrap_or("-"),
                        contact["last_message"].as_str().unwrap_or("")
                    );
                }
            }

            ChatCommand::Messages { contact_id } => {
                let value = expect_json(
                    self.http
                        .get(self.url(&format!("/api/v1/chat/contacts/{}/messages", contact_id)))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                let messages = value["messages"].as_array().cloned().unwrap_or_default();
                if messages.is_empty() {
                    println!("No messages yet.");
                }
                for message in messages {
                    print_message(&message);
                }
            }

            ChatCommand::Send { contact_id, text } => {
                let value = expect_json(
                    self.http
                        .post(self.url(&format!("/api/v1/chat/contacts/{}/messages", contact_id)))
                        .json(&serde_json::json!({ "text": text }))
                        .send()
                        .await?,
                )
                .await?;
                if self.print_json(&value)? {
                    return Ok(());
                }

                print_message(&value["message"]);
                if value["auto_reply_scheduled"].as_bool().unwrap_or(false) {
                    println!("(a reply will follow shortly)");
                }
            }
        }

        Ok(())
    }

    async fn dashboard(&self) -> anyhow::Result<()> {
        let value = expect_json(self.http.get(self.url("/api/v1/dashboard")).send().await?).await?;
        if self.print_json(&value)? {
            return Ok(());
        }

        for card in value["stats"].as_array().into_iter().flatten() {
            let change = card["change_percent"].as_f64().unwrap_or(0.0);
            println!(
                "{:<16} {:>8} {:>+7.1}%",
                card["title"].as_str().unwrap_or("-"),
                switchboard::dashboard::format_count(card["value"].as_u64().unwrap_or(0)),
                change
            );
        }

        println!();
        println!("{:<6} {:>6} {:>10} {:>6}", "Day", "Sent", "Delivered", "Read");
        println!("{}", "-".repeat(31));
        for day in value["activity"].as_array().into_iter().flatten() {
            println!(
                "{:<6} {:>6} {:>10} {:>6}",
                day["day"].as_str().unwrap_or("-"),
                day["sent"].as_u64().unwrap_or(0),
                day["delivered"].as_u64().unwrap_or(0),
                day["read"].as_u64().unwrap_or(0)
            );
        }

        let summary = &value["summary"];
        println!();
        println!(
            "Delivery rate: {:.1}%  Read rate: {:.1}%  Busiest day: {}",
            summary["delivery_rate"].as_f64().unwrap_or(0.0),
            summary["read_rate"].as_f64().unwrap_or(0.0),
            summary["busiest_day"].as_str().unwrap_or("-")
        );

        Ok(())
    }
}

/// Fail with the server's error message on a non-2xx response
async fn expect_success(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);
    bail!("Request failed ({}): {}", status, message)
}

async fn expect_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let response = expect_success(response).await?;
    response.json().await.context("Invalid JSON in response")
}

fn parse_pairs(pairs: &[String]) -> anyhow::Result<serde_json::Map<String, Value>> {
    let mut map = serde_json::Map::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected name=value, got: {}", pair))?;
        map.insert(name.to_string(), Value::String(value.to_string()));
    }
    Ok(map)
}

fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn print_template(template: &Template) {
    println!("{} ({})", template.title, template.id);
    println!();
    println!("{}", template.message);
    if !template.variables.is_empty() {
        println!();
        println!("Variables: {}", template.distinct_variables().join(", "));
    }
}

fn print_message(message: &Value) {
    let who = match message["sender"].as_str() {
        Some("user") => "you",
        _ => "customer",
    };
    let time = message["timestamp"]
        .as_str()
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("[{}] {:<8} {}", time, who, message["text"].as_str().unwrap_or(""));
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
