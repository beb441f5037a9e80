use std::time::Duration;

use snafu::ensure;

use super::error::{AssistantResult, EmptyPromptSnafu};

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1518837695005-2083093ee35b?w=500&h=500&fit=crop";
pub const DEFAULT_IMAGE_DELAY: Duration = Duration::from_millis(3_000);
pub const IMAGE_DOWNLOAD_FILE_NAME: &str = "ocean-visualization.jpg";

pub const QUICK_PROMPTS: [&str; 4] = [
    "Ocean temperature heatmap",
    "Argo float data visualization",
    "Deep sea currents diagram",
    "Marine ecosystem illustration",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub prompt: String,
    pub url: String,
}

/// Stand-in for an image generator; the prompt never influences the result.
#[derive(Debug, Clone)]
pub struct ImagePlaceholder {
    delay: Duration,
}

impl Default for ImagePlaceholder {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DELAY)
    }
}

impl ImagePlaceholder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Rejects blank prompts up front so callers never start a timer for them.
    pub fn validate_prompt(prompt: &str) -> AssistantResult<()> {
        ensure!(
            !prompt.trim().is_empty(),
            EmptyPromptSnafu {
                stage: "validate-image-prompt"
            }
        );
        Ok(())
    }

    pub async fn generate(&self, prompt: String) -> AssistantResult<GeneratedImage> {
        Self::validate_prompt(&prompt)?;

        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "simulating image generation");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(GeneratedImage {
            prompt,
            url: PLACEHOLDER_IMAGE_URL.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::error::AssistantError;

    #[tokio::test(start_paused = true)]
    async fn every_prompt_yields_the_same_placeholder_after_delay() {
        let placeholder = ImagePlaceholder::default();

        for prompt in QUICK_PROMPTS {
            let started = Instant::now();
            let image = placeholder.generate(prompt.to_string()).await.unwrap();
            assert_eq!(image.url, PLACEHOLDER_IMAGE_URL);
            assert_eq!(image.prompt, prompt);
            assert!(started.elapsed() >= DEFAULT_IMAGE_DELAY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn blank_prompt_is_rejected() {
        let placeholder = ImagePlaceholder::new(Duration::from_millis(10));
        let error = placeholder.generate("   ".to_string()).await.unwrap_err();
        assert!(matches!(error, AssistantError::EmptyPrompt { .. }));
    }
}
