use std::sync::Arc;

use argo_assistant::QUICK_PROMPTS;
use snafu::{OptionExt, ResultExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::chat::{ChatEvent, ChatSession, EventOutcome, SubmitOutcome};
use crate::error::{ChatError, ChatResult, QuickPromptOutOfRangeSnafu, ReadInputSnafu};
use crate::settings::ChatSettings;
use crate::terminal::command::{Command, HELP_TEXT, parse_line};
use crate::terminal::render::{LOADING_TEXT, render_header, render_image_panel, render_message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Runs the line-oriented chat on stdin until `/quit` or end of input.
pub async fn run_interactive(settings: Arc<ChatSettings>) -> ChatResult<()> {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let session = ChatSession::from_settings(settings, events_tx)?;

    println!("{}", render_header(session.settings()));
    print_history(&session)?;
    println!("Type /help for commands.");

    drive(session, events_rx, BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

/// Input lines and timer completions are multiplexed on one task, so the session
/// is never touched from two places at once. At end of input a pending reply is
/// still awaited and printed.
async fn drive<R>(
    mut session: ChatSession,
    mut events_rx: mpsc::UnboundedReceiver<ChatEvent>,
    input: R,
) -> ChatResult<ChatSession>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        if !input_open && !session.is_loading() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let line = line.context(ReadInputSnafu {
                    stage: "read-input-line",
                })?;
                let Some(line) = line else {
                    tracing::debug!(pending = session.is_loading(), "input closed");
                    input_open = false;
                    continue;
                };

                match dispatch(&mut session, parse_line(&line)) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(error) if error.is_user_facing() => report_user_error(&error),
                    Err(error) => return Err(error),
                }
            }
            Some(event) = events_rx.recv() => {
                let outcome = session.handle_event(event)?;
                report_outcome(&session, outcome);
            }
        }
    }

    if session.is_loading() {
        tracing::info!("abandoning pending reply on exit");
    }
    if session.image_panel().is_generating() {
        tracing::info!("abandoning pending image on exit");
    }
    Ok(session)
}

fn dispatch(session: &mut ChatSession, command: Command) -> ChatResult<Flow> {
    match command {
        Command::Message(text) => match session.submit(&text)? {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Busy { .. } => {
                println!("Still working on your last question. {LOADING_TEXT}");
            }
            SubmitOutcome::Accepted { .. } => println!("{LOADING_TEXT}"),
        },
        Command::ToggleImagePanel => {
            if session.toggle_image_panel() {
                print!("{}", render_image_panel(session.image_panel()));
            } else {
                println!("Image panel closed.");
            }
        }
        Command::ImagePrompt(prompt) => {
            session.open_image_panel();
            session.set_image_prompt(prompt);
            print!("{}", render_image_panel(session.image_panel()));
        }
        Command::QuickPrompt(number) => {
            // Typed numbers are one-based.
            let index = number.checked_sub(1).context(QuickPromptOutOfRangeSnafu {
                stage: "dispatch-quick-prompt",
                number,
                available: QUICK_PROMPTS.len(),
            })?;
            session.open_image_panel();
            let prompt = session.apply_quick_prompt(index)?;
            println!("Prompt set to \"{prompt}\".");
        }
        Command::GenerateImage => {
            session.generate_image()?;
            println!("Generating...");
        }
        Command::UseImage => {
            let record = session.use_generated_image()?;
            print!("{}", render_message(&record, session.settings()));
        }
        Command::NewConversation => {
            session.reset()?;
            println!("{}", render_header(session.settings()));
            print_history(session)?;
        }
        Command::History => print_history(session)?,
        Command::Help => println!("{HELP_TEXT}"),
        Command::Quit => return Ok(Flow::Quit),
        Command::Unknown(raw) => println!("Unknown command `{raw}`. Type /help for commands."),
    }
    Ok(Flow::Continue)
}

fn report_outcome(session: &ChatSession, outcome: EventOutcome) {
    match outcome {
        EventOutcome::MessageAppended(record) => {
            print!("{}", render_message(&record, session.settings()));
        }
        EventOutcome::ReplyFailed { message } => println!("! reply failed: {message}"),
        EventOutcome::ImageGenerated { url } => {
            println!("Visualization ready: {url}");
            println!("Type /use to post it into the chat.");
        }
        EventOutcome::ImageFailed { message } => println!("! image generation failed: {message}"),
        EventOutcome::Stale => {}
    }
}

fn report_user_error(error: &ChatError) {
    match error {
        ChatError::Assistant { source, .. } => println!("! {source}"),
        other => println!("! {other}"),
    }
}

fn print_history(session: &ChatSession) -> ChatResult<()> {
    for record in session.messages()? {
        print!("{}", render_message(&record, session.settings()));
    }
    Ok(())
}
