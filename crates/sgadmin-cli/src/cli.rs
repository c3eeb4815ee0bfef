//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use sgadmin_client::AccessTarget;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Command-line interface for the licensing administration server.
///
/// Configuration flags such as `--server` are handled separately and must
/// precede the command group.
#[derive(Parser, Debug)]
#[command(name = "sgadmin", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The command group to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Command groups, one per kind of server object.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Command {
    /// Manages customer accounts.
    Customers {
        /// The customer action to perform.
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Lists documents.
    Documents {
        /// The document action to perform.
        #[command(subcommand)]
        action: ListAction,
    },
    /// Lists publications.
    Publications {
        /// The publication action to perform.
        #[command(subcommand)]
        action: ListAction,
    },
    /// Grants, revokes or replaces access.
    Access {
        /// The access action to perform.
        #[command(subcommand)]
        action: AccessAction,
    },
    /// Reads the document access log.
    Logs {
        /// The log action to perform.
        #[command(subcommand)]
        action: LogAction,
    },
}

/// Customer account actions.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CustomerAction {
    /// Lists customers, optionally only the given ids.
    List {
        /// Customer ids, comma separated.
        #[arg(value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Registers a customer.
    Add(NewCustomerArgs),
    /// Changes an existing customer.
    Update(UpdateCustomerArgs),
    /// Deletes customers.
    Delete {
        /// Customer ids, comma separated.
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Suspends customers.
    Suspend {
        /// Customer ids, comma separated.
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Lifts a suspension.
    Activate {
        /// Customer ids, comma separated.
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<String>,
    },
    /// Emails a customer their licence again.
    ResendLicence {
        /// Customer id.
        id: String,
    },
}

/// Details of a new customer.
#[derive(Args, Debug, Clone)]
pub(crate) struct NewCustomerArgs {
    /// Display name.
    #[arg(long)]
    pub(crate) name: String,
    /// Contact address.
    #[arg(long)]
    pub(crate) email: String,
    /// Organisation.
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Number of devices the licence covers.
    #[arg(long, default_value_t = 1)]
    pub(crate) licenses: u32,
    /// First day of the licence (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<Date>,
    /// Last day of the licence (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub(crate) expiry_date: Option<Date>,
    /// Allows browser access.
    #[arg(long)]
    pub(crate) web_viewer: bool,
}

/// Fields to change on a customer.
#[derive(Args, Debug, Clone)]
pub(crate) struct UpdateCustomerArgs {
    /// Customer id.
    pub(crate) id: String,
    /// New display name.
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// New contact address.
    #[arg(long)]
    pub(crate) email: Option<String>,
    /// New organisation.
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// New device count.
    #[arg(long)]
    pub(crate) licenses: Option<u32>,
    /// New first day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<Date>,
    /// New last day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub(crate) expiry_date: Option<Date>,
    /// New browser access flag.
    #[arg(long)]
    pub(crate) web_viewer: Option<bool>,
}

/// Read-only catalogue actions.
#[derive(Subcommand, Debug, Clone, Copy)]
pub(crate) enum ListAction {
    /// Lists every entry.
    List,
}

/// What access is being changed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum TargetArg {
    /// Individual documents.
    Documents,
    /// Publications.
    Publications,
}

impl From<TargetArg> for AccessTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Documents => Self::Documents,
            TargetArg::Publications => Self::Publications,
        }
    }
}

/// Access actions.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum AccessAction {
    /// Grants customers access to targets.
    Grant(AccessArgs),
    /// Revokes customers' access to targets.
    Revoke(AccessArgs),
    /// Makes the given targets the only ones a customer can open.
    Replace {
        /// Kind of target.
        #[arg(long, value_enum)]
        target: TargetArg,
        /// Customer id.
        #[arg(long)]
        customer: String,
        /// Target ids to keep, comma separated; omit to revoke everything.
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
    },
}

/// Customers and targets for a grant or revoke.
#[derive(Args, Debug, Clone)]
pub(crate) struct AccessArgs {
    /// Kind of target.
    #[arg(long, value_enum)]
    pub(crate) target: TargetArg,
    /// Customer ids, comma separated.
    #[arg(long, required = true, value_delimiter = ',')]
    pub(crate) customers: Vec<String>,
    /// Target ids, comma separated.
    #[arg(long, required = true, value_delimiter = ',')]
    pub(crate) ids: Vec<String>,
}

/// Access log actions.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum LogAction {
    /// Lists access events.
    List {
        /// Restrict to these customer ids.
        #[arg(long, value_delimiter = ',')]
        customers: Vec<String>,
        /// Restrict to these document ids.
        #[arg(long, value_delimiter = ',')]
        documents: Vec<String>,
        /// Earliest day to include (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        since: Option<Date>,
        /// Latest day to include (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date)]
        until: Option<Date>,
    },
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, ISO_DATE).map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}
