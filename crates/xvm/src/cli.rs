use clap::{Args, Parser, Subcommand};

/// Per-user version manager for Go, Node.js and Java. Versions come from
/// version files and project manifests and are installed on first use.
#[derive(Debug, Parser)]
#[command(name = "xvm", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Activate the specified or all sdks.
    Activate(ActivateArgs),

    /// Execute a tool with the additional arguments.
    #[command(hide = true, disable_help_flag = true, disable_version_flag = true)]
    Exec {
        tool: String,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show xvm details.
    Show,
}

#[derive(Debug, Args)]
pub struct ActivateArgs {
    /// Activate every supported sdk.
    #[arg(short, long)]
    pub all: bool,

    /// Add the bin paths to the user's PATH. On unix every detected shell
    /// rc file is updated.
    #[arg(long = "add-binpath", alias = "add_binpath")]
    pub add_binpath: bool,

    pub sdks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn activate_parses_flags_and_names() {
        let cli = Cli::try_parse_from(["xvm", "activate", "--add-binpath", "go", "node"])
            .expect("activate arguments should parse");

        let Command::Activate(args) = cli.command else {
            panic!("expected activate command");
        };
        assert!(!args.all);
        assert!(args.add_binpath);
        assert_eq!(args.sdks, vec!["go", "node"]);
    }

    #[test]
    fn activate_accepts_short_all() {
        let cli = Cli::try_parse_from(["xvm", "activate", "-a"]).expect("activate -a should parse");

        assert!(matches!(cli.command, Command::Activate(ref args) if args.all && args.sdks.is_empty()));
    }

    #[test]
    fn exec_passes_flags_through_to_tool() {
        let cli = Cli::try_parse_from(["xvm", "exec", "go", "test", "-v", "--help", "./..."])
            .expect("exec arguments should parse");

        let Command::Exec { tool, args } = cli.command else {
            panic!("expected exec command");
        };
        assert_eq!(tool, "go");
        assert_eq!(args, vec!["test", "-v", "--help", "./..."]);
    }
}
