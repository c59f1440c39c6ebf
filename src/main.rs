//! shipgate — approval gate for agent shipping orders.
//!
//! Quick start:
//!   shipgate demo                 # the three classic scenarios
//!   shipgate order 10 Rotterdam   # one order, you approve it in the terminal
//!   shipgate serve                # let agents use the gate over a socket
//!   shipgate log                  # see what was decided
//!
//! For more info: shipgate --help

use clap::{Parser, Subcommand};
use colored::Colorize;
use shipgate::cli;
use shipgate::cli::demo::DemoOperator;
use shipgate::gate::config::{find_config_walking_up, load_config, parse_config_file};
use shipgate::gate::{linter, ApprovalGate};
use std::path::{Path, PathBuf};

/// shipgate — small orders ship, large orders wait for a human.
#[derive(Parser)]
#[command(
    name = "shipgate",
    version,
    about = "Human-in-the-loop approval for agent shipping orders",
    long_about = "shipgate auto-approves small shipping orders and pauses large\n\
                  ones until a human approves or rejects them.\n\n\
                  Quick start:\n  \
                  shipgate demo                 # see the three scenarios\n  \
                  shipgate order 10 Rotterdam   # place one order\n  \
                  shipgate serve                # serve agents over a socket"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the small / approved / rejected scenarios
    Demo {
        /// Ask in the terminal instead of simulating the operator
        #[arg(long, conflicts_with = "reject")]
        interactive: bool,

        /// Simulated operator rejects every paused order
        #[arg(long)]
        reject: bool,

        #[arg(short, long, help = "Path to a gate config file")]
        config: Option<PathBuf>,

        #[arg(long, env = "SHIPGATE_THRESHOLD", help = "Override the approval threshold")]
        threshold: Option<i64>,
    },

    /// Place one order and see it through
    Order {
        #[arg(allow_negative_numbers = true, help = "Number of containers")]
        quantity: i64,

        #[arg(required = true, num_args = 1.., help = "Destination (words are joined)")]
        destination: Vec<String>,

        #[arg(
            short,
            long,
            default_value = "terminal",
            env = "SHIPGATE_APPROVAL",
            help = "Who answers paused orders: terminal, auto, deny"
        )]
        approval: String,

        #[arg(short, long, help = "Path to a gate config file")]
        config: Option<PathBuf>,

        #[arg(long, env = "SHIPGATE_THRESHOLD", help = "Override the approval threshold")]
        threshold: Option<i64>,

        #[arg(long, help = "Session ID (default: random)")]
        session: Option<String>,
    },

    /// Serve the gate to agents over a Unix socket
    Serve {
        #[arg(short, long, help = "Socket path (default: /tmp/shipgate-<session>.sock)")]
        socket: Option<PathBuf>,

        #[arg(short, long, help = "Path to a gate config file")]
        config: Option<PathBuf>,

        #[arg(long, env = "SHIPGATE_THRESHOLD", help = "Override the approval threshold")]
        threshold: Option<i64>,

        #[arg(long, help = "Session ID (default: random)")]
        session: Option<String>,
    },

    /// Place an order with a running gateway
    Submit {
        #[arg(allow_negative_numbers = true, help = "Number of containers")]
        quantity: i64,

        #[arg(required = true, num_args = 1.., help = "Destination (words are joined)")]
        destination: Vec<String>,

        #[arg(short, long, env = "SHIPGATE_SOCKET", help = "Gateway socket path")]
        socket: Option<PathBuf>,
    },

    /// Approve or reject a paused order on a running gateway
    Resume {
        #[arg(help = "Pause token printed by `submit`")]
        token: String,

        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        approve: bool,

        #[arg(long)]
        reject: bool,

        #[arg(short, long, env = "SHIPGATE_SOCKET", help = "Gateway socket path")]
        socket: Option<PathBuf>,
    },

    /// List orders waiting for approval on a running gateway
    Pending {
        #[arg(short, long, env = "SHIPGATE_SOCKET", help = "Gateway socket path")]
        socket: Option<PathBuf>,
    },

    /// See what the gate decided
    Log {
        #[arg(short, long, help = "Session ID to view")]
        session: Option<String>,

        #[arg(short, long, help = "Filter: auto, pending, approved, rejected")]
        decision: Option<String>,

        #[arg(long, help = "Filter by destination (substring)")]
        destination: Option<String>,

        #[arg(short, long, help = "Max entries to show")]
        limit: Option<usize>,

        #[arg(long, help = "Show only the session summary")]
        summary: bool,

        #[arg(long, help = "List all recorded sessions")]
        list: bool,
    },

    /// Validate a gate config file
    Check {
        #[arg(default_value = ".shipgate.yaml")]
        config: PathBuf,
    },

    /// Create a gate config file from a template
    Init {
        #[arg(short, long, default_value = "default")]
        template: String,
        #[arg(short, long)]
        output: Option<String>,
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Only show tracing at RUST_LOG=info/debug to keep output clean
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shipgate=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => run_smart_default(),

        Some(Commands::Demo {
            interactive,
            reject,
            config,
            threshold,
        }) => {
            let operator = if interactive {
                DemoOperator::Interactive
            } else if reject {
                DemoOperator::RejectAll
            } else {
                DemoOperator::Scripted
            };
            match load_config(config.as_deref(), threshold) {
                Ok(config) => cli::demo::run_demo(config, operator).await,
                Err(e) => Err(e),
            }
        }

        Some(Commands::Order {
            quantity,
            destination,
            approval,
            config,
            threshold,
            session,
        }) => {
            let options = cli::order::OrderOptions {
                quantity,
                destination: destination.join(" "),
                approval_mode: approval,
                config_path: config,
                threshold,
                session_id: session,
            };
            cli::order::run_order(options).await
        }

        Some(Commands::Serve {
            socket,
            config,
            threshold,
            session,
        }) => {
            let options = cli::serve::ServeOptions {
                socket_path: socket,
                config_path: config,
                threshold,
                session_id: session,
            };
            cli::serve::run_serve(options).await
        }

        Some(Commands::Submit {
            quantity,
            destination,
            socket,
        }) => cli::remote::run_submit(socket.as_deref(), quantity, &destination.join(" ")),

        Some(Commands::Resume {
            token,
            approve,
            reject: _,
            socket,
        }) => cli::remote::run_resume(socket.as_deref(), &token, approve),

        Some(Commands::Pending { socket }) => cli::remote::run_pending(socket.as_deref()),

        Some(Commands::Log {
            session,
            decision,
            destination,
            limit,
            summary,
            list,
        }) => {
            if list {
                cli::log::run_log_list()
            } else {
                cli::log::run_log(
                    session.as_deref(),
                    decision.as_deref(),
                    destination.as_deref(),
                    limit,
                    summary,
                )
            }
        }

        Some(Commands::Check { config }) => run_check(&config),

        Some(Commands::Init {
            template,
            output,
            force,
        }) => cli::init::run_init(Some(&template), output.as_deref(), force),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}

/// When the user just types `shipgate`:
/// - No config file? → suggest `init`
/// - Has config? → show status
fn run_smart_default() -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match find_config_walking_up(&cwd) {
        None => {
            println!();
            println!("  {} No .shipgate.yaml found here or above.", "ℹ".blue());
            println!("  Using the built-in default: orders above 5 containers pause.");
            println!();
            println!("    {}        create a config", "shipgate init".bold());
            println!("    {}        see it in action", "shipgate demo".bold());
            println!();
            Ok(())
        }
        Some(path) => show_status(&path),
    }
}

/// Show config status and the last session's activity.
fn show_status(config_path: &Path) -> anyhow::Result<()> {
    let config = parse_config_file(config_path)?;

    println!();
    println!("  {}  {}", "shipgate".bold(), "— approvals are on".green());
    println!("  {}", "━".repeat(41).dimmed());
    println!();
    println!("  Gate:       {}", config.gate.cyan());
    println!("  Threshold:  >{} containers pause", config.threshold);
    println!("  Validation: {}", config.validation);
    println!("  File:       {}", config_path.display().to_string().dimmed());

    if let Ok(reader) = shipgate::audit::AuditReader::new() {
        if let Ok(entries) = reader.read_latest_session() {
            if !entries.is_empty() {
                let summary = shipgate::audit::AuditReader::summarize(&entries);
                println!();
                println!(
                    "  Last session: {} decisions ({} approved, {} rejected, {} pending)",
                    summary.total_events.to_string().bold(),
                    (summary.auto_approved + summary.human_approved)
                        .to_string()
                        .green(),
                    summary.rejected.to_string().red(),
                    summary.still_pending.to_string().yellow(),
                );
            }
        }
    }

    println!();
    println!("  {}", "Commands:".dimmed());
    println!("    {}   place an order", "shipgate order".bold());
    println!("    {}   serve agents over a socket", "shipgate serve".bold());
    println!("    {}     see what was decided", "shipgate log".bold());
    println!("    {}   validate your config", "shipgate check".bold());
    println!();

    Ok(())
}

/// Run the `shipgate check` command with linting.
fn run_check(config_path: &Path) -> anyhow::Result<()> {
    let gate = ApprovalGate::new(parse_config_file(config_path)?);
    let config = gate.config();

    println!();
    println!("  {} Config is valid!", "✓".green().bold());
    println!("  Gate:       {}", gate.gate_name().cyan());
    println!("  Threshold:  {}", gate.threshold());
    println!("  Validation: {}", gate.validation());
    if let Some(ref description) = config.description {
        println!("  {}", description.trim().dimmed());
    }

    let warnings = linter::lint_config(config);
    if warnings.is_empty() {
        println!();
        println!("  {} No issues found.", "✓".green());
    } else {
        println!();
        println!(
            "  {} {} {}:",
            "─".repeat(20).dimmed(),
            warnings.len(),
            if warnings.len() == 1 { "note" } else { "notes" }
        );
        println!();
        for warning in &warnings {
            println!("{}", warning.display());
        }
    }

    println!();
    Ok(())
}
