//! Command-line surface of the back office.
//!
//! Each command stands in for one page of the web app:
//! - `login` / `register` / `logout` / `whoami` - session
//! - `menu` / `open <path>` - role-filtered navigation
//! - `dashboard` - aggregates for an (employee, year, month), with export
//! - `clients`, `employees`, `subscriptions` - CRUD and lifecycle actions
//! - `activity` - audit trail
//! - `trash` - recycle bins: list, restore, purge
//! - `settings` - theme and language preferences

mod commands;
mod views;

pub use commands::check_config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::api::ApiError;
use crate::models::{ActivityAction, OfferType, RecordId, Role, SubscriptionStatus, TrashResource};
use crate::session::{Language, Theme};
use crate::AppState;

#[derive(Parser, Debug)]
#[command(name = "sga")]
#[command(author, version, about = "SGA System back office: clients, employees and subscriptions", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sga.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Backend URL, including the /api prefix
    #[arg(long, env = "SGA_API_URL")]
    pub api_url: Option<String>,

    /// Use this token instead of the stored session
    #[arg(long, env = "SGA_TOKEN")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        /// Prompted for when omitted
        #[arg(short, long, env = "SGA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "SGA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user and preferences
    Whoami,

    /// List the sections available to your role
    Menu,

    /// Open a page by path, e.g. /clients/12
    Open {
        path: String,
    },

    /// Dashboard for a period
    Dashboard(DashboardArgs),

    /// Client management
    #[command(subcommand)]
    Clients(ClientsCommands),

    /// Employee management (admin)
    #[command(subcommand)]
    Employees(EmployeesCommands),

    /// Subscription management
    #[command(subcommand)]
    Subscriptions(SubscriptionsCommands),

    /// Activity logs (admin)
    Activity {
        #[arg(long)]
        action: Option<ActivityAction>,
        /// Subject type, e.g. Client
        #[arg(long)]
        subject: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Recycle bins (admin)
    #[command(subcommand)]
    Trash(TrashCommands),

    /// Theme and language preferences
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Configuration file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Default)]
pub struct DashboardArgs {
    /// Restrict to one employee
    #[arg(long)]
    pub employee: Option<RecordId>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
    /// Write the spreadsheet export to this file instead of printing
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ClientFields {
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// Assigned employee
    #[arg(long)]
    pub employee: Option<RecordId>,
}

#[derive(Subcommand, Debug)]
pub enum ClientsCommands {
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        employee: Option<RecordId>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    Show {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: ClientFields,
    },
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ClientFields,
        /// List page the client is shown on
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Move a client to the recycle bin
    Delete {
        id: RecordId,
        /// List page the client is shown on
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Search as you type: one query per stdin line
    Search {
        #[arg(long)]
        employee: Option<RecordId>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmployeesCommands {
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    Show {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, default_value = "employee")]
        role: Role,
        #[arg(long, env = "SGA_EMPLOYEE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Move an employee to the recycle bin
    Delete {
        id: RecordId,
        /// Employee who takes over the clients
        #[arg(long)]
        transfer_to: Option<RecordId>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionsCommands {
    List {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<SubscriptionStatus>,
        #[arg(long)]
        offer: Option<OfferType>,
        #[arg(long)]
        employee: Option<RecordId>,
        #[arg(long)]
        client: Option<RecordId>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    Show {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        client: RecordId,
        #[arg(long)]
        employee: Option<RecordId>,
        #[arg(long)]
        offer: OfferType,
        #[arg(long)]
        price: f64,
        /// Defaults to today
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Defaults to start + offer period
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        #[arg(long, default_value = "Active")]
        status: SubscriptionStatus,
    },
    Update {
        id: RecordId,
        #[arg(long)]
        offer: Option<OfferType>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        status: Option<SubscriptionStatus>,
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Move a subscription to the recycle bin
    Delete {
        id: RecordId,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    /// Close the current cycle and open a new paid one
    Renew {
        id: RecordId,
        #[arg(long)]
        offer: Option<OfferType>,
        #[arg(long)]
        amount: f64,
        /// Defaults to the current end date
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Cancel; the subscription stays listed but read-only
    Cancel {
        id: RecordId,
        /// Effective end date (server default when omitted)
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,
    },
    /// Download the payment receipt (PDF)
    Receipt {
        id: RecordId,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TrashCommands {
    List {
        resource: TrashResource,
        #[arg(long, default_value = "1")]
        page: u32,
    },
    Restore {
        resource: TrashResource,
        id: RecordId,
    },
    /// Delete permanently (asks for confirmation)
    Purge {
        resource: TrashResource,
        id: RecordId,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    Show,
    Theme { theme: Theme },
    Language { language: Language },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate the configuration file
    Check,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

/// Run a command. Backend failures are printed as user feedback and turn
/// into a failure exit code; anything else propagates.
pub async fn run_command(cli: &Cli, app: &AppState) -> Result<ExitCode> {
    match commands::dispatch(cli, app).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<ApiError>() {
            Some(api_err) => {
                tracing::debug!(error = %api_err, code = api_err.code().as_str(), "Command failed");
                app.handle_error(api_err).print();
                Ok(ExitCode::FAILURE)
            }
            None => Err(e),
        },
    }
}
