/// One line of terminal input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the assistant. May be blank; the session decides.
    Message(String),
    ToggleImagePanel,
    ImagePrompt(String),
    /// One-based suggestion number as typed.
    QuickPrompt(usize),
    GenerateImage,
    UseImage,
    NewConversation,
    History,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands:
  /image          toggle the ocean visualization panel
  /prompt <text>  describe the visualization to generate
  /idea <1-4>     use one of the quick prompt ideas
  /generate       generate the visualization
  /use            post the generated visualization into the chat
  /new            start a new conversation
  /history        reprint the conversation
  /help           show this help
  /quit           exit";

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (rest, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "image" => Command::ToggleImagePanel,
        "prompt" => Command::ImagePrompt(argument.to_string()),
        "idea" => match argument.parse::<usize>() {
            Ok(index) => Command::QuickPrompt(index),
            Err(_) => Command::Unknown(trimmed.to_string()),
        },
        "generate" => Command::GenerateImage,
        "use" => Command::UseImage,
        "new" => Command::NewConversation,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
