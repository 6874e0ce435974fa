use clap::{Args, Parser, Subcommand};

use crate::model::item::Mode;

#[derive(Parser)]
#[command(name = "twodo", about = concat!("twodo v", env!("CARGO_PKG_VERSION"), " - one list for work, one for travel"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'D', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items of the active list
    List(ListArgs),
    /// Add an item to the active list
    Add(AddArgs),
    /// Show or set the active list
    Mode(ModeArgs),
    /// Switch to the Work list (shortcut for mode work)
    Work,
    /// Switch to the Travel list (shortcut for mode travel)
    Travel,
    /// Toggle an item's completion
    Toggle(IdArgs),
    /// Replace an item's text
    Edit(EditArgs),
    /// Delete an item
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// List to show (default: the active list)
    #[arg(long)]
    pub mode: Option<Mode>,
    /// Show both lists
    #[arg(long, conflicts_with = "mode")]
    pub all: bool,
    /// Only items whose text matches this regex (case-insensitive)
    #[arg(long)]
    pub grep: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct ModeArgs {
    /// work or travel; omit to print the active list
    pub mode: Option<Mode>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Item ID
    pub id: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Item ID
    pub id: String,
    /// New text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Item ID
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_mode_value() {
        let cli = Cli::try_parse_from(["twodo", "mode", "Travel"]).unwrap();
        match cli.command {
            Some(Commands::Mode(args)) => assert_eq!(args.mode, Some(Mode::Travel)),
            _ => panic!("expected mode command"),
        }
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["twodo", "add", "buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text.join(" "), "buy milk"),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn list_all_conflicts_with_mode() {
        assert!(Cli::try_parse_from(["twodo", "list", "--all", "--mode", "work"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["twodo", "list", "--json", "-D", "/tmp/x"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
    }
}
