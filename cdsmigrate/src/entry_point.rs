use crate::analyzer::{EmptyUnitPolicy, Migrator};
use crate::cli::{Cli, Commands};
use crate::config::Config;
use anyhow::Result;
use clap::Parser;

/// Runs the scanner (or other commands) with the given arguments.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run cdsmigrate with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["cdsmigrate".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    // Subcommands without paths discover config from the current directory.
    let config_start = match &cli_var.command {
        Some(Commands::Fix { paths, .. }) => paths.config_start(),
        _ => cli_var.paths.config_start(),
    };
    let config = Config::load_from_path(&config_start);

    let json_mode = cli_var.output.json
        || matches!(
            cli_var.command,
            Some(Commands::Remediate { .. } | Commands::Registry { json: true })
        );
    let verbose = match &cli_var.command {
        Some(Commands::Fix { verbose, .. }) => *verbose || cli_var.output.verbose,
        _ => cli_var.output.verbose,
    } && !json_mode;

    if verbose {
        eprintln!("[VERBOSE] cdsmigrate v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        match &config.config_file_path {
            Some(path) => eprintln!("[VERBOSE] Config: {}", path.display()),
            None => eprintln!("[VERBOSE] Config: defaults"),
        }
        if let Some(ref command) = cli_var.command {
            eprintln!("[VERBOSE] Executing subcommand: {command:?}");
        }
        eprintln!();
    }

    let migrator = match Migrator::from_config(&config) {
        Ok(m) => m.with_verbose(verbose),
        Err(e) => {
            eprintln!("Error: invalid mappings in configuration: {e}");
            return Ok(1);
        }
    };

    if let Some(command) = cli_var.command {
        match command {
            Commands::Remediate {
                input,
                include_empty,
                pretty,
            } => {
                let policy = if include_empty || cli_var.output.include_empty {
                    EmptyUnitPolicy::Include
                } else {
                    migrator.empty_unit_policy
                };
                match crate::commands::run_remediate(
                    &migrator,
                    input.as_deref(),
                    policy,
                    pretty,
                    &mut std::io::stdin().lock(),
                    writer,
                ) {
                    Ok(code) => Ok(code),
                    Err(e) => {
                        eprintln!("Error: {e:#}");
                        Ok(1)
                    }
                }
            }
            Commands::Fix {
                paths,
                diff_only,
                exclude,
                ..
            } => {
                let targets = paths.targets();
                if let Some(missing) = targets.iter().find(|p| !p.exists()) {
                    eprintln!(
                        "Error: The file or directory '{}' does not exist.",
                        missing.display()
                    );
                    return Ok(1);
                }
                let migrator = migrator.with_excludes(exclude);
                crate::commands::run_fix(
                    migrator,
                    &targets,
                    &crate::commands::FixOptions { diff_only },
                    writer,
                )
            }
            Commands::Registry { json } => {
                crate::commands::run_registry(&migrator.registry, json, writer)
            }
            Commands::McpServer => {
                // Handled in cdsmigrate-cli main.rs before calling entry_point.
                eprintln!("Error: mcp-server command should be handled by cdsmigrate-cli directly.");
                eprintln!("If you're seeing this, please use the cdsmigrate binary.");
                Ok(1)
            }
        }
    } else {
        let targets = cli_var.paths.targets();
        for path in &targets {
            if !path.exists() {
                eprintln!(
                    "Error: The file or directory '{}' does not exist.",
                    path.display()
                );
                return Ok(1);
            }
        }

        let include_empty = cli_var.output.include_empty;
        let fail_on_findings =
            cli_var.fail_on_findings || config.cdsmigrate.fail_on_findings.unwrap_or(false);

        let mut migrator = migrator
            .with_excludes(cli_var.exclude_folders)
            .with_extensions(cli_var.extensions);
        if include_empty {
            migrator = migrator.with_empty_unit_policy(EmptyUnitPolicy::Include);
        }

        if !cli_var.output.json && cli_var.output_file.is_none() {
            crate::output::print_exclusion_list(writer, &migrator.exclude_folders).ok();
        }

        if verbose {
            eprintln!("[VERBOSE] Configuration:");
            eprintln!("   Mappings: {}", migrator.registry.len());
            eprintln!("   Extensions: {:?}", migrator.extensions);
            eprintln!("   Snippet context: {}", migrator.snippet_context);
            eprintln!("   Empty units: {:?}", migrator.empty_unit_policy);
            eprintln!("   Paths: {targets:?}");
            if !migrator.exclude_folders.is_empty() {
                eprintln!("   Exclude folders: {:?}", migrator.exclude_folders);
            }
            eprintln!();
        }

        crate::commands::run_scan(
            migrator,
            &targets,
            &crate::commands::ScanOptions {
                json: cli_var.output.json,
                fail_on_findings,
                output_file: cli_var.output_file,
                root: cli_var.paths.root,
            },
            writer,
        )
    }
}
