use std::sync::Arc;

mod error;
mod image;
mod responder;
mod selector;
mod templates;

pub use error::{AssistantError, AssistantResult};
pub use futures::future::BoxFuture;
pub use image::{
    DEFAULT_IMAGE_DELAY, GeneratedImage, IMAGE_DOWNLOAD_FILE_NAME, ImagePlaceholder,
    PLACEHOLDER_IMAGE_URL, QUICK_PROMPTS,
};
pub use responder::{
    CANNED_RESPONDER_ID, CannedResponder, DEFAULT_REPLY_DELAY, Responder, ResponderConfig,
};
pub use selector::{Reply, ReplyRole, Topic, classify, select_response};
pub use templates::{
    ARGO_TEMPLATE, ATLANTIC_TEMPLATE, CURRENTS_TEMPLATE, DEFAULT_TEMPLATE, GREETING_TEMPLATE,
    IMAGE_CAPTION_TEMPLATE, PACIFIC_TEMPLATE, SALINITY_TEMPLATE, TEMPERATURE_TEMPLATE,
};

pub fn create_responder(mut config: ResponderConfig) -> AssistantResult<Arc<dyn Responder>> {
    if config.responder_id.trim().is_empty() {
        config.responder_id = CANNED_RESPONDER_ID.to_string();
    }

    match config.responder_id.as_str() {
        CANNED_RESPONDER_ID => Ok(Arc::new(CannedResponder::new(config.reply_delay))),
        _ => Err(AssistantError::UnsupportedResponder {
            stage: "create-responder",
            responder_id: config.responder_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn blank_id_falls_back_to_canned() {
        let responder = create_responder(ResponderConfig::new("  ", Duration::ZERO)).unwrap();
        assert_eq!(responder.id(), CANNED_RESPONDER_ID);
    }

    #[test]
    fn unknown_responder_is_rejected() {
        let error = create_responder(ResponderConfig::new("openai", Duration::ZERO))
            .err()
            .unwrap();
        assert!(matches!(
            error,
            AssistantError::UnsupportedResponder { ref responder_id, .. }
                if responder_id == "openai"
        ));
    }
}
