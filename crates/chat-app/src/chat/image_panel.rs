use argo_assistant::GeneratedImage;

use crate::chat::message::ImageTarget;

/// Side-panel state for the simulated image generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePanel {
    open: bool,
    prompt: String,
    generating: Option<ImageTarget>,
    generated: Option<GeneratedImage>,
}

impl ImagePanel {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open();
        }
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the panel and forgets its prompt and results. A generation still in
    /// flight is no longer awaited, so its result arrives stale.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn is_generating(&self) -> bool {
        self.generating.is_some()
    }

    pub fn generated(&self) -> Option<&GeneratedImage> {
        self.generated.as_ref()
    }

    pub(crate) fn begin(&mut self, target: ImageTarget) {
        self.generating = Some(target);
    }

    /// Stores the result if it answers the in-flight request.
    pub(crate) fn finish(&mut self, target: ImageTarget, image: GeneratedImage) -> bool {
        if self.generating != Some(target) {
            return false;
        }
        self.generating = None;
        self.generated = Some(image);
        true
    }

    pub(crate) fn fail(&mut self, target: ImageTarget) -> bool {
        if self.generating != Some(target) {
            return false;
        }
        self.generating = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use argo_assistant::PLACEHOLDER_IMAGE_URL;
    use argo_storage::ConversationId;

    use super::*;
    use crate::chat::message::RequestSeq;

    fn image() -> GeneratedImage {
        GeneratedImage {
            prompt: "reef".to_string(),
            url: PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut panel = ImagePanel::default();
        assert!(panel.toggle());
        assert!(!panel.toggle());
        assert!(!panel.is_open());
    }

    #[test]
    fn only_the_in_flight_target_is_accepted() {
        let conversation_id = ConversationId::new_v7();
        let current = ImageTarget::new(conversation_id, RequestSeq::new(2));
        let stale = ImageTarget::new(conversation_id, RequestSeq::new(1));

        let mut panel = ImagePanel::default();
        panel.begin(current);
        assert!(!panel.finish(stale, image()));
        assert!(panel.is_generating());

        assert!(panel.finish(current, image()));
        assert!(!panel.is_generating());
        assert_eq!(panel.generated(), Some(&image()));
    }

    #[test]
    fn closing_discards_prompt_and_pending_generation() {
        let target = ImageTarget::new(ConversationId::new_v7(), RequestSeq::new(1));
        let mut panel = ImagePanel::default();
        panel.open();
        panel.set_prompt("reef");
        panel.begin(target);
        panel.close();

        assert!(!panel.finish(target, image()));
        assert!(panel.generated().is_none());
        assert!(!panel.is_generating());
        assert_eq!(panel.prompt(), "");
    }

    #[test]
    fn toggling_closed_drops_generated_image() {
        let target = ImageTarget::new(ConversationId::new_v7(), RequestSeq::new(1));
        let mut panel = ImagePanel::default();
        assert!(panel.toggle());
        panel.begin(target);
        assert!(panel.finish(target, image()));

        assert!(!panel.toggle());
        assert!(panel.generated().is_none());
        assert!(panel.toggle());
        assert!(panel.generated().is_none());
    }
}
