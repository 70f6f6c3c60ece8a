//! CLI commands

use anyhow::{Context as _, Result};
use clap::{Subcommand, ValueEnum};
use cockpit_core::Router;
use cockpit_http::types::{
    BirthdayQuery, BirthdayUpdate, JoinLotteryRequest, MessageQuery, NewBirthday,
};
use cockpit_http::{AuthenticatedClient, PublicClient, SessionState, SessionStore};
use serde::Serialize;
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

/// Everything a command needs to talk to the backend
pub struct Context {
    pub session: Arc<SessionStore>,
    pub client: AuthenticatedClient,
    pub public: PublicClient,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session token
    Login {
        username: String,

        /// Falls back to a line read from stdin, which is echoed
        #[arg(long, env = "COCKPIT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log out on the backend and forget the session token
    Logout,

    /// Show the current session and administrator
    Whoami,

    /// Dashboard counters, todos and birthdays
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },

    /// Birthday reminders
    Birthday {
        #[command(subcommand)]
        command: BirthdayCommands,
    },

    /// System configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Received messages
    Message {
        #[command(subcommand)]
        command: MessageCommands,
    },

    /// Lottery signup, no login required
    Lottery {
        #[command(subcommand)]
        command: LotteryCommands,
    },

    /// Resolve a console route and print its page title
    Route { path: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Calendar {
    Solar,
    Lunar,
}

impl Calendar {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Solar => "solar",
            Self::Lunar => "lunar",
        }
    }
}

#[derive(Subcommand)]
pub enum BirthdayCommands {
    /// List reminders
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        /// Substring of the name
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a reminder
    Add {
        name: String,
        /// YYYY-MM-DD, use year 1900 when unknown
        birth_date: String,
        #[arg(long, value_enum, default_value = "solar")]
        calendar: Calendar,
        #[arg(long)]
        note: Option<String>,
    },

    /// Change fields of a reminder
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        birth_date: Option<String>,
        #[arg(long, value_enum)]
        calendar: Option<Calendar>,
        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a reminder
    Delete { id: i64 },

    /// Birthdays falling on today
    Today,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Custom entries with remarks
    List,

    /// Value of one key
    Get { key: String },

    /// Write one key; the value is parsed as JSON, else taken as a string
    Set { key: String, value: String },

    /// Delete one key
    Delete { key: String },

    /// Full configuration snapshot
    All,
}

#[derive(Subcommand)]
pub enum MessageCommands {
    /// List messages
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        source: Option<String>,
        /// Matches content or sender
        #[arg(long)]
        keyword: Option<String>,
        /// Inclusive, YYYY-MM-DD
        #[arg(long)]
        start_date: Option<String>,
        /// Inclusive, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
    },

    /// One message with its raw payload
    Detail { id: i64 },

    /// Delete a message
    Delete { id: i64 },

    /// Counters by source and for today
    Stats,
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Message, birthday and contact counters
    Stats,

    /// Today's unfinished tasks
    Todos,

    /// Birthdays falling on today
    Birthdays,
}

#[derive(Subcommand)]
pub enum LotteryCommands {
    /// Sign up for the lottery
    Join { name: String },
}

impl Commands {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Login { username, password } => login(ctx, &username, password).await,
            Self::Logout => logout(ctx).await,
            Self::Whoami => whoami(ctx).await,
            Self::Dashboard { command } => command.execute(&ctx.client).await,
            Self::Birthday { command } => command.execute(&ctx.client).await,
            Self::Config { command } => command.execute(&ctx.client).await,
            Self::Message { command } => command.execute(&ctx.client).await,
            Self::Lottery { command } => command.execute(&ctx.public).await,
            Self::Route { path } => {
                println!("{}", route_title(&path));
                Ok(())
            }
        }
    }
}

impl BirthdayCommands {
    pub async fn execute(self, client: &AuthenticatedClient) -> Result<()> {
        let api = client.birthday();
        match self {
            Self::List { page, size, name } => {
                print_json(&api.list(&BirthdayQuery { page, size, name }).await?)
            }
            Self::Add {
                name,
                birth_date,
                calendar,
                note,
            } => {
                let created = api
                    .add(&NewBirthday {
                        name,
                        birth_date,
                        calendar_type: calendar.as_str().to_string(),
                        note,
                    })
                    .await?;
                print_json(&created)
            }
            Self::Update {
                id,
                name,
                birth_date,
                calendar,
                note,
            } => {
                let update = BirthdayUpdate {
                    name,
                    birth_date,
                    calendar_type: calendar.map(|c| c.as_str().to_string()),
                    note,
                };
                api.update(id, &update).await?;
                println!("Updated birthday {id}");
                Ok(())
            }
            Self::Delete { id } => {
                api.delete(id).await?;
                println!("Deleted birthday {id}");
                Ok(())
            }
            Self::Today => print_json(&api.get_today_birthdays().await?),
        }
    }
}

impl ConfigCommands {
    pub async fn execute(self, client: &AuthenticatedClient) -> Result<()> {
        let api = client.config();
        match self {
            Self::List => print_json(&api.list().await?),
            Self::Get { key } => print_json(&api.get(&key).await?),
            Self::Set { key, value } => {
                api.set(&key, parse_config_value(value)).await?;
                println!("Saved {key}");
                Ok(())
            }
            Self::Delete { key } => {
                api.delete(&key).await?;
                println!("Deleted {key}");
                Ok(())
            }
            Self::All => print_json(&api.get_all().await?),
        }
    }
}

impl MessageCommands {
    pub async fn execute(self, client: &AuthenticatedClient) -> Result<()> {
        let api = client.message();
        match self {
            Self::List {
                page,
                size,
                source,
                keyword,
                start_date,
                end_date,
            } => {
                let query = MessageQuery {
                    page,
                    size,
                    source,
                    keyword,
                    start_date,
                    end_date,
                };
                print_json(&api.list(&query).await?)
            }
            Self::Detail { id } => print_json(&api.detail(id).await?),
            Self::Delete { id } => {
                api.delete(id).await?;
                println!("Deleted message {id}");
                Ok(())
            }
            Self::Stats => print_json(&api.stats().await?),
        }
    }
}

impl DashboardCommands {
    pub async fn execute(self, client: &AuthenticatedClient) -> Result<()> {
        let api = client.dashboard();
        match self {
            Self::Stats => print_json(&api.stats().await?),
            Self::Todos => print_json(&api.todos().await?),
            Self::Birthdays => print_json(&api.birthdays().await?),
        }
    }
}

impl LotteryCommands {
    pub async fn execute(self, client: &PublicClient) -> Result<()> {
        match self {
            Self::Join { name } => {
                let joined = client
                    .lottery()
                    .join_lottery(&JoinLotteryRequest { name })
                    .await?;
                print_json(&joined)
            }
        }
    }
}

async fn login(ctx: &Context, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    let response = ctx.session.login(&ctx.client, username, &password).await?;
    println!(
        "Logged in as {}",
        response.username.as_deref().unwrap_or(username)
    );
    Ok(())
}

async fn logout(ctx: &Context) -> Result<()> {
    if ctx.session.is_authenticated() {
        // The local session is dropped even when the backend call fails
        if let Err(e) = ctx.client.auth().logout().await {
            info!(error = %e, "Backend logout failed");
        }
    }
    ctx.session.logout();
    println!("Logged out");
    Ok(())
}

async fn whoami(ctx: &Context) -> Result<()> {
    if ctx.session.state() == SessionState::Anonymous {
        println!("Not logged in");
        return Ok(());
    }

    ctx.session.refresh_user(&ctx.client).await?;
    print_json(&ctx.session.user())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// JSON literals keep their type, anything else is sent as a string
fn parse_config_value(raw: String) -> Value {
    serde_json::from_str(&raw).unwrap_or(Value::String(raw))
}

/// Page title the console shows for `path`
fn route_title(path: &str) -> String {
    let mut router = Router::default();
    router.after_each(|route| {
        info!(path = %route.path, matched = route.is_matched(), "Route resolved");
    });
    router.navigate(path);
    router.title().to_string()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_password_can_come_from_environment() {
        let cmd = TestCli::command();
        let login = cmd.find_subcommand("login").unwrap();
        let password = login
            .get_arguments()
            .find(|arg| arg.get_id() == "password")
            .unwrap();

        assert_eq!(password.get_env(), Some(std::ffi::OsStr::new("COCKPIT_PASSWORD")));
        assert!(password.is_hide_env_values_set());
        let help = password.get_help().unwrap().to_string();
        assert!(help.contains("echoed"), "{help}");
    }

    #[test]
    fn test_parse_login_and_dashboard() {
        let cli = TestCli::try_parse_from(["cockpit", "login", "alice", "--password", "pw"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Login { ref username, password: Some(ref pw) } if username == "alice" && pw == "pw"
        ));

        let cli = TestCli::try_parse_from(["cockpit", "dashboard", "todos"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Dashboard {
                command: DashboardCommands::Todos
            }
        ));
    }

    #[test]
    fn test_parse_config_value() {
        assert_eq!(parse_config_value("hi".to_string()), Value::String("hi".into()));
        assert_eq!(parse_config_value("42".to_string()), serde_json::json!(42));
        assert_eq!(parse_config_value("false".to_string()), Value::Bool(false));
        assert_eq!(
            parse_config_value("{\"a\":1}".to_string()),
            serde_json::json!({"a": 1})
        );
    }

    #[test]
    fn test_route_title() {
        assert_eq!(route_title("/birthday"), "生日管理 - Agent 智能座舱");
        assert_eq!(route_title("/nowhere"), "管理后台 - Agent 智能座舱");
    }
}
