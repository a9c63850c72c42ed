use crate::export::ExportFormat;
use crate::models::{Activity, CompareOperator};
use clap::{Args, Parser, Subcommand};

/// Command-line interface for protrak
/// Track work and break slots per project with SQLite
#[derive(Parser)]
#[command(
    name = "protrak",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work and break time per client and project, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// List the known activities, or look one up
    Activities {
        #[arg(help = "Activity id (work, break); lists all when omitted")]
        id: Option<String>,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Track and manage time slots of a project
    Slot {
        #[command(subcommand)]
        action: SlotAction,
    },
}

/// `--limit` / `--offset` of a listing.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    #[arg(
        long,
        allow_negative_numbers = true,
        help = "Maximum rows to show (-1 = all; default from config)"
    )]
    pub limit: Option<i64>,

    #[arg(long, default_value_t = 0, help = "Rows to skip (only with a limit)")]
    pub offset: i64,
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// Add a client
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change name or description of a client
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Show one client
    Get { id: i64 },

    /// List clients
    List {
        #[arg(long, help = "Name contains (case-insensitive)")]
        name: Option<String>,
        #[arg(long, help = "Description contains (case-insensitive)")]
        description: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Delete a client
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        name: String,
        #[arg(long, help = "Owning client id")]
        client: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change a project (use --client 0 to detach it from its client)
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Show one project and its client
    Get { id: i64 },

    /// List projects
    List {
        #[arg(long, help = "Name contains (case-insensitive)")]
        name: Option<String>,
        #[arg(long, help = "Owning client id")]
        client: Option<i64>,
        #[arg(long, help = "Description contains (case-insensitive)")]
        description: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Delete a project
    Delete { id: i64 },

    /// Create a project named "New Project"
    New {
        #[arg(long, help = "Owning client id")]
        client: Option<i64>,
    },
}

/// Slot listing predicates shared by `slot list` and `slot export`.
#[derive(Args, Debug, Clone, Default)]
pub struct SlotFilterArgs {
    #[arg(long, short = 'p', help = "Project id")]
    pub project: Option<i64>,

    #[arg(long, value_enum)]
    pub activity: Option<Activity>,

    #[arg(
        long = "start-time",
        help = "Compare start with this time (RFC 3339 or YYYY-MM-DD HH:MM)"
    )]
    pub start_time: Option<String>,

    #[arg(
        long = "start-cmp",
        value_parser = CompareOperator::parse,
        default_value = "eq",
        help = "Operator for --start-time: eq, ne, lt, le, gt, ge (or =, <>, <, <=, >, >=)"
    )]
    pub start_cmp: CompareOperator,

    #[arg(
        long = "end-time",
        help = "Compare end with this time (RFC 3339 or YYYY-MM-DD HH:MM)"
    )]
    pub end_time: Option<String>,

    #[arg(
        long = "end-cmp",
        value_parser = CompareOperator::parse,
        default_value = "eq",
        help = "Operator for --end-time: eq, ne, lt, le, gt, ge (or =, <>, <, <=, >, >=)"
    )]
    pub end_cmp: CompareOperator,

    #[arg(long, conflicts_with = "closed", help = "Only slots without an end")]
    pub open: bool,

    #[arg(long, help = "Only slots with an end")]
    pub closed: bool,

    #[arg(long, help = "Description contains (case-insensitive)")]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum SlotAction {
    /// Open a slot starting now
    Start {
        #[arg(long, short = 'p')]
        project: i64,
        #[arg(long, value_enum, default_value_t = Activity::Work)]
        activity: Activity,
        #[arg(long)]
        description: Option<String>,
    },

    /// Close the open slot of a project now
    Stop {
        #[arg(long, short = 'p')]
        project: i64,
    },

    /// Add a slot with explicit times
    Add {
        #[arg(long, short = 'p')]
        project: i64,
        #[arg(long, value_enum, default_value_t = Activity::Work)]
        activity: Activity,
        #[arg(long, help = "Start (RFC 3339 or YYYY-MM-DD HH:MM)")]
        start: String,
        #[arg(long, help = "End (RFC 3339 or YYYY-MM-DD HH:MM); omit to leave open")]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Change a slot
    Update {
        id: i64,
        #[arg(long, short = 'p')]
        project: i64,
        #[arg(long, value_enum)]
        activity: Option<Activity>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Show one slot
    Get {
        id: i64,
        #[arg(long, short = 'p')]
        project: i64,
    },

    /// List slots
    List {
        #[command(flatten)]
        filter: SlotFilterArgs,
        #[arg(
            long,
            allow_hyphen_values = true,
            help = "Sort key (id, projectId, activity, start, end, description); prefix '-' for descending. Repeatable"
        )]
        sort: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Show the open slot of a project
    Open {
        #[arg(long, short = 'p')]
        project: i64,
    },

    /// Delete a slot
    Delete {
        id: i64,
        #[arg(long, short = 'p')]
        project: i64,
    },

    /// Export slots to a file
    Export {
        #[command(flatten)]
        filter: SlotFilterArgs,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        #[arg(long)]
        file: String,
        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}
