use argo_assistant::AssistantError;
use argo_storage::StorageError;
use snafu::Snafu;

use crate::chat::message::ReplyTransitionRejection;
use crate::settings::SettingsError;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ChatError {
    #[snafu(display("conversation storage failed on `{stage}`: {source}"))]
    Storage {
        stage: &'static str,
        source: StorageError,
    },
    #[snafu(display("assistant failed on `{stage}`: {source}"))]
    Assistant {
        stage: &'static str,
        source: AssistantError,
    },
    #[snafu(display("settings failed on `{stage}`: {source}"))]
    Settings {
        stage: &'static str,
        source: SettingsError,
    },
    #[snafu(display("reply lifecycle rejected transition on `{stage}`: {rejection:?}"))]
    ReplyTransition {
        stage: &'static str,
        rejection: ReplyTransitionRejection,
    },
    #[snafu(display("no generated image is available to use"))]
    NoGeneratedImage { stage: &'static str },
    /// `number` is one-based, as the user typed it.
    #[snafu(display("quick prompt {number} is out of range (1-{available})"))]
    QuickPromptOutOfRange {
        stage: &'static str,
        number: usize,
        available: usize,
    },
    #[snafu(display("the image panel is closed; open it first"))]
    ImagePanelClosed { stage: &'static str },
    #[snafu(display("an image is already being generated"))]
    ImageGenerationInProgress { stage: &'static str },
    #[snafu(display("failed to read terminal input on `{stage}`: {source}"))]
    ReadInput {
        stage: &'static str,
        source: std::io::Error,
    },
}

impl ChatError {
    /// Errors caused by a command issued at the wrong time; the session stays usable.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Assistant { .. }
                | Self::NoGeneratedImage { .. }
                | Self::QuickPromptOutOfRange { .. }
                | Self::ImagePanelClosed { .. }
                | Self::ImageGenerationInProgress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_are_user_facing() {
        let error = ChatError::QuickPromptOutOfRange {
            stage: "test",
            number: 0,
            available: 4,
        };
        assert!(error.is_user_facing());
        assert_eq!(error.to_string(), "quick prompt 0 is out of range (1-4)");
        assert!(ChatError::ImagePanelClosed { stage: "test" }.is_user_facing());
    }

    #[test]
    fn lifecycle_and_storage_errors_end_the_session() {
        let rejection = ChatError::ReplyTransition {
            stage: "test",
            rejection: ReplyTransitionRejection::NoPendingReply,
        };
        assert!(!rejection.is_user_facing());

        let storage = ChatError::Storage {
            stage: "test",
            source: StorageError::LockPoisoned { stage: "test" },
        };
        assert!(!storage.is_user_facing());
    }
}
