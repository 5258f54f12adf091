//! Line-oriented command loop driving the dashboard.
//!
//! Reads commands from any async reader and writes rendered views to any
//! async writer, so a session can be scripted in tests.

use crate::error::DashboardError;
use crate::render;

use safety_core::config::AppConfig;
use safety_core::dashboard::{DashboardController, Tab};
use safety_core::position::PositionRequest;

use common::ErrorLocation;
use models::{LocationCategory, parse_category_filter};

use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

const PROMPT: &str = "salama> ";
const CANCEL_PROMPT: &str = "Are you safe? Cancel the alert [y/N]: ";

const HELP: &str = "\
Commands:
  tab <overview|contacts|map|voice|settings>   switch view
  filter <all|police|hospital|safe_space>      filter safe locations
  locate                                       update location
  show                                         redraw the current view
  panic                                        raise an emergency alert
  cancel                                       cancel the alert (asks to confirm)
  say <words>                                  feed a voice transcript
  listen <on|off>                              toggle voice recognition
  help                                         this text
  quit                                         exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Help,
    Show,
    Tab(Tab),
    Filter(Option<LocationCategory>),
    Locate,
    Panic,
    Cancel,
    Say(String),
    Listen(bool),
    Quit,
}

/// Parse one input line.
///
/// # Errors
///
/// Returns [`DashboardError::App`] for unknown commands or bad arguments.
#[track_caller]
pub fn parse_command(line: &str) -> Result<Command, DashboardError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "help" | "?" => Command::Help,
        "show" | "list" => Command::Show,
        "tab" => match Tab::from_id(rest) {
            Some(tab) => Command::Tab(tab),
            None => return Err(usage(format!("Unknown tab: '{rest}'"))),
        },
        "filter" => match parse_category_filter(rest) {
            Ok(filter) => Command::Filter(filter),
            Err(_) => return Err(usage(format!("Unknown category: '{rest}'"))),
        },
        "locate" | "update" => Command::Locate,
        "panic" | "sos" => Command::Panic,
        "cancel" | "safe" => Command::Cancel,
        "say" if !rest.is_empty() => Command::Say(rest.to_string()),
        "say" => return Err(usage(String::from("'say' needs some words"))),
        "listen" => match rest.to_ascii_lowercase().as_str() {
            "on" => Command::Listen(true),
            "off" => Command::Listen(false),
            _ => {
                return Err(usage(format!(
                    "Expected 'listen on' or 'listen off', got '{rest}'"
                )));
            }
        },
        "quit" | "exit" => Command::Quit,
        other => return Err(usage(format!("Unknown command: '{other}' (try 'help')"))),
    };

    Ok(command)
}

#[track_caller]
fn usage(message: String) -> DashboardError {
    DashboardError::App {
        message,
        location: ErrorLocation::caller(),
    }
}

/// Whether a confirmation answer means yes.
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Run the command loop until `quit` or end of input.
pub async fn run<R, W>(
    dashboard: &mut DashboardController,
    config: &AppConfig,
    input: R,
    mut output: W,
) -> Result<(), DashboardError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    let view = render::render_dashboard(dashboard, config).await;
    write_block(&mut output, &view).await?;

    loop {
        write_raw(&mut output, PROMPT).await?;

        let Some(line) = next_line(&mut lines).await? else {
            info!("Input closed, leaving dashboard");
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(DashboardError::App { message, .. }) => {
                write_block(&mut output, &message).await?;
                continue;
            }
            Err(e) => return Err(e),
        };
        debug!("Command: {command:?}");

        let reply = match command {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => String::from(HELP),
            Command::Show => render::render_dashboard(dashboard, config).await,
            Command::Tab(tab) => {
                dashboard.select_tab(tab);
                render::render_dashboard(dashboard, config).await
            }
            Command::Filter(filter) => {
                dashboard.set_filter(filter);
                dashboard.select_tab(Tab::Map);
                render::render_dashboard(dashboard, config).await
            }
            Command::Locate => match dashboard.update_location() {
                PositionRequest::Started => String::from("Updating location..."),
                PositionRequest::AlreadyInFlight => {
                    String::from("Location update already in progress.")
                }
            },
            Command::Panic => {
                let outcome = dashboard.press_panic().await?;
                format!(
                    "{}\n{}",
                    render::activation_message(&outcome),
                    render::render_dashboard(dashboard, config).await
                )
            }
            Command::Cancel => {
                if !dashboard.overlay_visible().await {
                    String::from("No active alert.")
                } else {
                    write_raw(&mut output, CANCEL_PROMPT).await?;
                    let confirmed = next_line(&mut lines)
                        .await?
                        .is_some_and(|answer| is_confirmation(&answer));
                    let outcome = dashboard.cancel_alert(confirmed).await?;
                    render::deactivation_message(outcome.as_ref())
                }
            }
            Command::Say(transcript) => match dashboard.voice() {
                None => String::from("Voice recognition is disabled."),
                Some(voice) => match voice.on_transcript(&transcript).await? {
                    Some(outcome) => render::activation_message(&outcome),
                    None if !voice.is_listening() => {
                        String::from("Voice recognition is paused.")
                    }
                    None => String::from("No trigger phrase heard."),
                },
            },
            Command::Listen(listening) => match dashboard.voice() {
                None => String::from("Voice recognition is disabled."),
                Some(voice) => {
                    voice.set_listening(listening);
                    render::voice_panel(Some(voice))
                }
            },
        };

        write_block(&mut output, &reply).await?;
    }

    Ok(())
}

async fn next_line<R>(lines: &mut Lines<R>) -> Result<Option<String>, DashboardError>
where
    R: AsyncBufRead + Unpin,
{
    lines.next_line().await.map_err(|e| DashboardError::App {
        message: format!("Failed to read input: {e}"),
        location: ErrorLocation::caller(),
    })
}

async fn write_block<W>(output: &mut W, text: &str) -> Result<(), DashboardError>
where
    W: AsyncWrite + Unpin,
{
    write_raw(output, &format!("{text}\n")).await
}

async fn write_raw<W>(output: &mut W, text: &str) -> Result<(), DashboardError>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await.map_err(|e| DashboardError::App {
        message: format!("Failed to write output: {e}"),
        location: ErrorLocation::caller(),
    })?;
    output.flush().await.map_err(|e| DashboardError::App {
        message: format!("Failed to flush output: {e}"),
        location: ErrorLocation::caller(),
    })
}
