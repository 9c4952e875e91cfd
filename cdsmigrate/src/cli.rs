use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.cdsmigrate.toml):
  Create this file in your project root to set defaults.

  [cdsmigrate]
  include_empty_units = false  # Keep units without findings in output
  snippet_context = 60         # Bytes of context around each match
  extensions = [\"abap\"]        # Source file extensions
  exclude_folders = [\"build\"]  # Folders to skip
  fail_on_findings = false     # Exit 1 when any finding is reported

  # Extra obsolete tables (extend or override the built-in list)
  [[cdsmigrate.mappings]]
  obsolete = \"J_1BBRANCH\"
  replacement = \"P_BusinessPlace\"
  note = \"3404390\"
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being scanned).
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep units without findings in the output.
    #[arg(long)]
    pub include_empty: bool,
}

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to scan (files or directories).
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root to scan.
    /// Also the containment boundary for --output-file.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

impl PathArgs {
    /// Paths to scan, with `--root` taking the place of positional paths.
    #[must_use]
    pub fn targets(&self) -> Vec<PathBuf> {
        match &self.root {
            Some(root) => vec![root.clone()],
            None => self.paths.clone(),
        }
    }

    /// Starting point for config discovery.
    #[must_use]
    pub fn config_start(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(|| self.paths.first().cloned())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "cdsmigrate - Find obsolete ABAP tables and suggest released CDS views",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Option<Commands>,

    /// Global path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Folders to exclude from the scan.
    #[arg(long, short = 'e', alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// File extensions to scan (without dot). Defaults to `abap`.
    #[arg(long = "extension", short = 'x')]
    pub extensions: Vec<String>,

    /// Exit with code 1 if any finding is reported.
    #[arg(long)]
    pub fail_on_findings: bool,

    /// Save output to file.
    #[arg(long, short = 'O')]
    pub output_file: Option<String>,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Scan a JSON array of code units and print the unit results as JSON
    Remediate {
        /// JSON file with the units; `-` or absent reads stdin.
        #[arg(long, short = 'i')]
        input: Option<PathBuf>,

        /// Keep units without findings in the output.
        #[arg(long)]
        include_empty: bool,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
    /// Print source files with every suggestion applied (files are not modified)
    Fix {
        /// Path options (paths vs root).
        #[command(flatten)]
        paths: PathArgs,

        /// Only print the before/after statement of each finding.
        #[arg(long)]
        diff_only: bool,

        /// Exclude folders.
        #[arg(long, short = 'e', alias = "exclude-folder")]
        exclude: Vec<String>,

        /// Enable verbose output.
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the active obsolete table mappings
    Registry {
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
    /// Start MCP server for LLM integration (Claude Desktop, VS Code Copilot, etc.)
    #[command(name = "mcp-server")]
    McpServer,
}
