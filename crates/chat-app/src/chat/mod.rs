/// Timer completions routed back to the session loop.
pub mod events;
pub mod image_panel;
/// Request routing keys and the reply lifecycle.
pub mod message;
pub mod session;

pub use events::ChatEvent;
pub use image_panel::ImagePanel;
pub use message::{
    ImageTarget, ReplyState, ReplyTarget, ReplyTransition, ReplyTransitionRejection,
    ReplyTransitionResult, RequestSeq,
};
pub use session::{ChatSession, EventOutcome, SubmitOutcome};
