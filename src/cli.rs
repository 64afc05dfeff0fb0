use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "club-league result processor")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch finished tournaments from the feed and record their results
    Process {
        /// Override the lookback window in hours
        #[arg(long)]
        lookback_hours: Option<i64>,
    },
    /// Create the database schema
    Init {
        /// Drop all existing data first
        #[arg(long)]
        reset: bool,
    },
    /// Show or change the current season
    Season {
        /// New season number
        #[arg(long)]
        set: Option<i64>,
    },
    /// Add or update a roster entry
    Register {
        /// Competitor id as used by the feed
        competitor_id: String,
        /// Display name
        name: String,
        /// Club name (created if missing)
        #[arg(short, long)]
        club: Option<String>,
    },
    /// Print the leaderboard
    Standings {
        /// Rank competitors instead of clubs
        #[arg(long)]
        competitors: bool,
        /// Use lifetime totals instead of a season
        #[arg(long, conflicts_with = "season")]
        lifetime: bool,
        /// Season to show (defaults to the current one)
        #[arg(long)]
        season: Option<i64>,
        /// Number of rows
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
