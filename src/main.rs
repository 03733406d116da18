/*!
Main binary for jsonlex.
*/

use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, info};
use memmap2::Mmap;
use std::io::{self, IsTerminal, Read, stdout};
use std::{fs::File, path::Path, path::PathBuf};

use jsonlex::commands;
use jsonlex::tokenizer::Lexer;
use jsonlex::utils::{OutputFormat, write_token};

/// Print the token stream of a JSON document.
#[derive(Parser)]
#[command(name = "jl", version, about, long_about = None, disable_help_subcommand = true, args_conflicts_with_subcommands = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Emit one JSON object per token instead of the debug form
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
    /// Print the number of tokens and errors to STDERR when done
    #[arg(long, action = ArgAction::SetTrue)]
    count: bool,
    /// Stop at the first lexical error
    #[arg(long, action = ArgAction::SetTrue)]
    fail_fast: bool,
    /// Disable colored output
    #[arg(long, action = ArgAction::SetTrue)]
    no_color: bool,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Available subcommands for `jl`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jl to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Source text, either mapped from a regular file or buffered from STDIN,
/// a pipe or any other stream.
enum Input {
    Mapped(Mmap),
    Buffered(String),
}

impl Input {
    fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let is_file = file
            .metadata()
            .with_context(|| format!("Failed to read file {}", path.display()))?
            .is_file();
        if !is_file {
            // FIFOs, character devices and process substitution cannot be
            // mapped
            debug!("{} is not a regular file, buffering it", path.display());
            let mut buffer = String::new();
            file.read_to_string(&mut buffer).with_context(|| {
                format!("Failed to read file {}", path.display())
            })?;
            return Ok(Self::Buffered(buffer));
        }
        // SAFETY: the mapping is read-only and lives only for this run; the
        // file is not expected to be truncated while it is scanned.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Failed to map file {}", path.display()))?;
        Ok(Self::Mapped(map))
    }

    fn text(&self) -> Result<&str> {
        match self {
            Self::Mapped(map) => {
                std::str::from_utf8(map).context("Input is not valid UTF-8")
            }
            Self::Buffered(text) => Ok(text),
        }
    }
}

/// Entry point for main binary.
///
/// Tokenizes the input file, or STDIN if it is piped in, and prints one token
/// per line to STDOUT. Exits with an error if any lexical error was found.
fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "jl", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )?;
            }
        },
        None => {
            let input = if let Some(path) = &args.input {
                debug!("opening {}", path.display());
                Input::open(path)?
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                debug!("reading STDIN");
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read STDIN")?;
                Input::Buffered(buffer)
            };

            if args.no_color || !stdout().is_terminal() {
                colored::control::set_override(false);
            }
            let format = if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Debug
            };

            let mut out = stdout().lock();
            let mut lexer = Lexer::with_source(input.text()?);
            let (mut count, mut errors) = (0_usize, 0_usize);
            for token in lexer.tokens() {
                write_token(&mut out, &token, format)?;
                count += 1;
                if token.is_error() {
                    errors += 1;
                    if args.fail_fast {
                        break;
                    }
                }
            }

            info!("scanned {count} tokens, {errors} errors");
            if args.count {
                eprintln!("Tokens: {count}, errors: {errors}");
            }
            if errors > 0 {
                bail!("found {errors} lexical error(s)");
            }
        }
    }

    Ok(())
}
