use clap::{Args, Parser, Subcommand};

/// Startup flags. The binary takes no subcommands; it always opens an
/// interactive session and the per-line grammar lives in [`SessionLine`].
#[derive(Parser)]
#[command(name = "pl", about = concat!("[>] punchlist v", env!("CARGO_PKG_VERSION"), " - project items, one session at a time"), version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to a punchlist.toml (default: ./punchlist.toml if present)
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// One line of session input, parsed applet-style: the first token is the
/// command name.
#[derive(Parser)]
#[command(name = "punchlist", multicall = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new project item
    Add(AddArgs),
    /// List items (active by default)
    List(ListArgs),
    /// Show full details for an item
    Show(IdArg),
    /// Set an item's workflow status
    Status(StatusArgs),
    /// Set an item's priority
    Priority(PriorityArgs),
    /// Rename an item
    Title(TitleArgs),
    /// Set or clear an item's notes
    Note(TextArgs),
    /// Set or clear an item's file link
    File(TextArgs),
    /// Set or clear an item's media link
    Media(TextArgs),
    /// Toggle the approved flag
    Approve(IdArg),
    /// Toggle the completed flag
    Done(IdArg),
    /// Clear the completed flag
    Reopen(IdArg),
    /// Bring an item back from the archive
    Restore(IdArg),
    /// Archive one or more items
    Archive(IdsArgs),
    /// Permanently delete one or more items
    Delete(DeleteArgs),
    /// Per-date counts of active items
    Calendar(CalendarArgs),
    /// Search titles and notes by regex
    Search(SearchArgs),
    /// Collection statistics
    Stats,
    /// End the session
    #[command(alias = "exit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Item title (quote multi-word titles)
    pub title: String,
    /// Due date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    /// Initial status (backlog, in_progress, stuck, done)
    #[arg(long)]
    pub status: Option<String>,
    /// Initial priority (low, medium, high, urgent)
    #[arg(long)]
    pub priority: Option<String>,
    /// Notes text
    #[arg(long)]
    pub notes: Option<String>,
    /// File link URL
    #[arg(long)]
    pub file: Option<String>,
    /// Media link URL
    #[arg(long)]
    pub media: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Item ID
    pub id: String,
    /// New status (backlog, in_progress, stuck, done)
    pub status: String,
}

#[derive(Args)]
pub struct PriorityArgs {
    /// Item ID
    pub id: String,
    /// New priority (low, medium, high, urgent)
    pub priority: String,
}

#[derive(Args)]
pub struct TitleArgs {
    /// Item ID
    pub id: String,
    /// New title
    pub title: String,
}

/// Shared shape for the note/file/media commands: an omitted value clears
/// the field.
#[derive(Args)]
pub struct TextArgs {
    /// Item ID
    pub id: String,
    /// New value (omit to clear)
    pub value: Option<String>,
}

#[derive(Args)]
pub struct IdArg {
    /// Item ID
    pub id: String,
}

#[derive(Args)]
pub struct IdsArgs {
    /// Item IDs
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Item IDs to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Show archived items instead of active ones
    #[arg(long, conflicts_with_all = ["completed", "all"])]
    pub archived: bool,
    /// Show completed items (archived or not)
    #[arg(long, conflicts_with = "all")]
    pub completed: bool,
    /// Show everything
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Restrict to one month, YYYY-MM
    #[arg(long)]
    pub month: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
    /// Also search archived items
    #[arg(short, long)]
    pub archived: bool,
}
