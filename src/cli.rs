//! CLI argument definitions using Clap

use clap::Parser;

/// Push a note, link or file to your devices via Pushbullet.
#[derive(Parser, Debug)]
#[command(name = "pb")]
#[command(version)]
#[command(about = "Pushbullet from the command line")]
pub struct Cli {
    /// Message to push: free text, a URL, or a path to an existing file.
    /// Multiple words are joined with single spaces. When omitted, the
    /// message is read from standard input.
    #[arg(value_name = "message")]
    pub msg: Vec<String>,

    /// Push to all devices
    #[arg(short, long, conflicts_with_all = ["interactive", "device"])]
    pub all: bool,

    /// Interactively ask for device to push to
    #[arg(short, long, conflicts_with = "device")]
    pub interactive: bool,

    /// Device name to push to
    #[arg(short, long, value_name = "NAME")]
    pub device: Option<String>,
}

impl Cli {
    /// The message words joined into the single string that gets
    /// classified and pushed. Empty when the message should come from
    /// standard input instead.
    pub fn message(&self) -> String {
        self.msg.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parses_defaults() {
        let cli = Cli::parse_from(["pb"]);
        assert!(cli.msg.is_empty());
        assert!(!cli.all);
        assert!(!cli.interactive);
        assert!(cli.device.is_none());
    }

    #[test]
    fn parses_message_words() {
        let cli = Cli::parse_from(["pb", "hello", "world"]);
        assert_eq!(cli.msg, vec!["hello", "world"]);
        assert_eq!(cli.message(), "hello world");
    }

    #[test]
    fn parses_each_selection_flag_alone() {
        assert!(Cli::parse_from(["pb", "-a", "hi"]).all);
        assert!(Cli::parse_from(["pb", "--interactive", "hi"]).interactive);
        let cli = Cli::parse_from(["pb", "-d", "Phone", "hi"]);
        assert_eq!(cli.device.as_deref(), Some("Phone"));
    }

    #[test]
    fn selection_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["pb", "-a", "-i", "hi"]).is_err());
        assert!(Cli::try_parse_from(["pb", "-a", "-d", "Phone", "hi"]).is_err());
        assert!(Cli::try_parse_from(["pb", "-i", "-d", "Phone", "hi"]).is_err());
        assert!(Cli::try_parse_from(["pb", "-a", "-i", "-d", "Phone"]).is_err());
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
