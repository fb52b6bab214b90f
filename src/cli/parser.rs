use crate::export::{ExportTarget, ReportFormat};
use crate::import::ImportKind;
use crate::models::report_kind::ReportKind;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for shiftdesk
/// Shift scheduling, leave management and Excel/PDF reports backed by SQLite
#[derive(Parser)]
#[command(
    name = "shiftdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Shift scheduling, leave requests and template-driven Excel/PDF reports using SQLite",
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

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the roster
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Set or clear shifts
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Leave and work-extension requests, and leave types
    Leave {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Company holidays
    Holiday {
        #[command(subcommand)]
        action: HolidayAction,
    },

    /// Shift tasks
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Communication allowances
    Allowance {
        #[command(subcommand)]
        action: AllowanceAction,
    },

    /// Record minutes late for an employee on a date
    Tardy {
        /// Employee id, email or name
        employee: String,
        /// Date (YYYY-MM-DD or MM/DD/YYYY)
        date: String,
        /// Minutes late
        minutes: i32,
        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// Import a CSV file
    Import {
        #[arg(value_enum)]
        kind: ImportKind,
        /// CSV file to read
        file: String,
    },

    /// Export data as CSV in the import formats
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short, help = "Period for schedule exports (YYYY-MM or start:end)")]
        period: Option<String>,

        #[arg(long, short)]
        group: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage uploaded report templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Generate a report (from a stored template or the built-in layout)
    Report {
        #[arg(value_enum)]
        kind: ReportKind,

        #[arg(long, short, help = "YYYY-MM, YYYY-MM-DD or start:end")]
        period: String,

        #[arg(long, short)]
        group: Option<String>,

        #[arg(long, short, help = "Name of an uploaded template")]
        template: Option<String>,

        #[arg(long, value_enum, default_value = "xlsx")]
        format: ReportFormat,

        #[arg(long, value_name = "DIR", default_value = ".")]
        out: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the schedule grid in the terminal
    List {
        #[arg(long, short, help = "YYYY-MM, YYYY-MM-DD or start:end (default: current month)")]
        period: Option<String>,

        #[arg(long, short)]
        group: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee
    Add {
        first_name: String,
        last_name: String,
        email: String,
        #[arg(long)]
        middle: Option<String>,
        #[arg(long, default_value = "")]
        position: String,
        #[arg(long, default_value = "")]
        group: String,
    },
    /// List employees
    List {
        #[arg(long, short)]
        group: Option<String>,
        #[arg(long, help = "Include inactive employees")]
        all: bool,
    },
    /// Change visibility flags
    Visibility {
        employee: String,
        #[arg(long)]
        schedule: Option<bool>,
        #[arg(long)]
        reports: Option<bool>,
    },
    /// Mark an employee inactive (kept for history)
    Deactivate { employee: String },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Schedule a shift, day off or holiday off
    Set {
        employee: String,
        date: String,
        #[arg(long, help = "Working hours, e.g. 09:00-18:00 or 9am-6pm")]
        time: Option<String>,
        #[arg(long = "break", help = "Break, e.g. 12:00-13:00")]
        break_time: Option<String>,
        #[arg(long, help = "Use a named shift template")]
        template: Option<String>,
        #[arg(long, conflicts_with_all = ["time", "template", "hol_off"])]
        off: bool,
        #[arg(long = "hol-off", conflicts_with_all = ["time", "template"])]
        hol_off: bool,
        #[arg(long, help = "Work from home")]
        remote: bool,
    },
    /// Remove whatever is scheduled
    Clear { employee: String, date: String },
}

#[derive(Subcommand)]
pub enum LeaveAction {
    /// Submit a leave or work-extension request
    Submit {
        employee: String,
        leave_type: String,
        start: String,
        #[arg(long, help = "Last day (default: start)")]
        end: Option<String>,
        #[arg(long, default_value = "")]
        reason: String,
        #[arg(long, help = "Hours (work extensions only)")]
        hours: Option<f64>,
    },
    Approve { id: i64 },
    Reject { id: i64 },
    /// List requests
    List {
        #[arg(long, value_enum)]
        status: Option<LeaveStatusArg>,
    },
    /// Add or update a leave type
    Type {
        name: String,
        abbreviation: String,
        #[arg(long, default_value = "#999999")]
        color: String,
        #[arg(long = "work-extension")]
        work_extension: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LeaveStatusArg {
    Pending,
    Approved,
    Rejected,
}

#[derive(Subcommand)]
pub enum HolidayAction {
    Add {
        title: String,
        date: String,
        #[arg(long, default_value = "Regular")]
        kind: String,
    },
    Remove { date: String },
    List {
        #[arg(long, short)]
        period: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    Add {
        employee: String,
        date: String,
        title: String,
    },
    Complete { id: i64 },
    List {
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AllowanceAction {
    /// Record the allowance of an employee for a month (YYYY-MM)
    Record {
        employee: String,
        month: String,
        amount: f64,
        #[arg(long, default_value = "")]
        remarks: String,
    },
    /// Total allowances for a month
    Total { month: String },
}

#[derive(Subcommand)]
pub enum TemplateAction {
    Upload {
        name: String,
        #[arg(value_enum)]
        kind: ReportKind,
        file: String,
    },
    List,
    Delete { name: String },
}
