use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use tickmat_core::model::{ContextId, Quadrant};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tickmat",
    version,
    about = "Eisenhower matrix over your remote TickTick task list.",
    after_help = "Examples:\n  tickmat login\n  tickmat matrix --context today\n  tickmat move 67a35844d5bf3b00000003bb q1\n  tickmat due 67a35844d5bf3b00000003bb 2026-01-28"
)]
pub struct Cli {
    /// Override the tracing filter (e.g. "info", "tickmat_core=debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// Bearer token override (defaults to TICKTICK_ACCESS_TOKEN)
    #[arg(long = "access-token", value_name = "TOKEN", global = true)]
    pub access_token: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Run the interactive OAuth2 onboarding flow
    Login,
    /// List the remote projects the matrix draws from
    Projects,
    /// Render the 2x2 matrix, optionally narrowed to a date context
    Matrix(MatrixArgs),
    /// Move a task to another quadrant
    Move(MoveArgs),
    /// Reschedule a task to a new local date
    Due(DueArgs),
}

#[derive(Args, Debug, Clone)]
pub struct MatrixArgs {
    /// Date-bucket filter applied before partitioning
    #[arg(long, value_enum, default_value_t = ContextId::All)]
    pub context: ContextId,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// Remote task id
    #[arg(value_name = "TASK_ID")]
    pub id: String,

    /// Target quadrant
    #[arg(value_enum, value_name = "QUADRANT")]
    pub quadrant: Quadrant,
}

#[derive(Args, Debug, Clone)]
pub struct DueArgs {
    /// Remote task id
    #[arg(value_name = "TASK_ID")]
    pub id: String,

    /// New due date in your local calendar (YYYY-MM-DD)
    #[arg(value_name = "DATE")]
    pub date: NaiveDate,
}
