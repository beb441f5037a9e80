use argo_assistant::{GeneratedImage, Reply};

use crate::chat::message::{ImageTarget, ReplyTarget};

/// Completion of a timer-driven task, delivered back to the session loop.
///
/// Tasks only send these; the session is the sole writer of conversation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    ReplyReady {
        target: ReplyTarget,
        reply: Reply,
    },
    ReplyFailed {
        target: ReplyTarget,
        message: String,
    },
    ImageReady {
        target: ImageTarget,
        image: GeneratedImage,
    },
    ImageFailed {
        target: ImageTarget,
        message: String,
    },
}

impl ChatEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReplyReady { .. } => "reply-ready",
            Self::ReplyFailed { .. } => "reply-failed",
            Self::ImageReady { .. } => "image-ready",
            Self::ImageFailed { .. } => "image-failed",
        }
    }
}
