//! wolfies-send - Send iMessages to your contacts from the command line
//!
//! Contacts from Contacts.app (or a JSON export), sending via AppleScript.
//!
//! CHANGELOG:
//! - 01/14/2026 - send/open/contacts/addresses/quicklink commands (Claude)
//! - 01/10/2026 - Initial scaffold with CLI skeleton (Claude)

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use wolfies_send::commands::{self, send::SendArgs, Session};
use wolfies_send::config::Preferences;
use wolfies_send::form::LaunchContext;
use wolfies_send::orchestrator::SubmitOutcome;
use wolfies_send::output::{self, OutputControls};

/// Send iMessages to your contacts via Messages.app.
#[derive(Parser, Debug)]
#[command(name = "wolfies-send")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (no whitespace)
    #[arg(long, global = true)]
    compact: bool,

    /// Config file (default: WOLFIES_SEND_CONFIG or <config dir>/wolfies-send/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a message to one of a contact's addresses
    Send {
        /// Contact id or name (fuzzy matched)
        #[arg(short, long)]
        contact: Option<String>,

        /// Phone number or email of that contact
        #[arg(short, long)]
        address: Option<String>,

        /// Pre-fill from a launch context JSON ({"contactId","address","text"})
        #[arg(long, value_parser = parse_launch_context)]
        launch_context: Option<LaunchContext>,

        /// Start from the saved draft
        #[arg(long)]
        resume: bool,

        /// Open the chat in Messages after a successful send
        #[arg(long)]
        open_chat: bool,

        /// Message to send
        message: Vec<String>,
    },

    /// Replay a quicklink created with `quicklink`
    Open {
        /// Quicklink URL
        link: String,

        /// Open the chat in Messages after a successful send
        #[arg(long)]
        open_chat: bool,
    },

    /// List contacts and their addresses
    Contacts,

    /// List the addresses of one contact
    Addresses {
        /// Contact id or name
        contact: String,
    },

    /// Print shareable quicklinks for a contact, address and message
    Quicklink {
        /// Contact id or name
        #[arg(short, long)]
        contact: String,

        /// Phone number or email
        #[arg(short, long)]
        address: String,

        /// Message to pre-fill
        message: Vec<String>,
    },
}

fn parse_launch_context(raw: &str) -> Result<LaunchContext, String> {
    serde_json::from_str(raw).map_err(|e| e.to_string())
}

fn join_message(words: Vec<String>) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn exit_code(outcome: SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Sent => ExitCode::from(0),
        _ => ExitCode::from(1),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let output_controls = OutputControls {
        json: cli.json,
        compact: cli.compact,
    };

    let prefs = match Preferences::load(cli.config.as_deref()) {
        Ok(prefs) => prefs,
        Err(e) => {
            report_error(&output_controls, &e.to_string());
            return ExitCode::from(1);
        }
    };

    let open_chat = matches!(
        cli.command,
        Command::Send { open_chat: true, .. } | Command::Open { open_chat: true, .. }
    );
    let session = Session::desktop(prefs, output_controls.clone(), open_chat);

    let result = match cli.command {
        Command::Send {
            contact,
            address,
            launch_context,
            resume,
            message,
            ..
        } => commands::send::send(
            &session,
            SendArgs {
                contact,
                address,
                text: join_message(message),
                launch_context,
                resume,
            },
        )
        .await
        .map(exit_code),
        Command::Open { link, .. } => commands::send::open_link(&session, &link)
            .await
            .map(exit_code),
        Command::Contacts => commands::contacts::list(&session)
            .await
            .map(|()| ExitCode::from(0)),
        Command::Addresses { contact } => commands::contacts::addresses(&session, &contact)
            .await
            .map(|()| ExitCode::from(0)),
        Command::Quicklink {
            contact,
            address,
            message,
        } => commands::quicklink::create(
            &session,
            &contact,
            &address,
            &join_message(message).unwrap_or_default(),
        )
        .await
        .map(|()| ExitCode::from(0)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            report_error(&output_controls, &format!("{:#}", e));
            ExitCode::from(1)
        }
    }
}

fn report_error(output: &OutputControls, message: &str) {
    if output.json {
        println!("{}", output::format_error(message));
    } else {
        eprintln!("Error: {}", message);
    }
}
