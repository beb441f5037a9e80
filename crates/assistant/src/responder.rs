use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use snafu::ensure;

use super::error::{AssistantResult, EmptyInputSnafu};
use super::selector::{Reply, select_response};

pub const CANNED_RESPONDER_ID: &str = "canned";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1_500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    pub responder_id: String,
    pub reply_delay: Duration,
}

impl ResponderConfig {
    pub fn new(responder_id: impl Into<String>, reply_delay: Duration) -> Self {
        Self {
            responder_id: responder_id.into().trim().to_string(),
            reply_delay,
        }
    }
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self::new(CANNED_RESPONDER_ID, DEFAULT_REPLY_DELAY)
    }
}

/// Source of assistant replies.
pub trait Responder: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn respond(&self, input: String) -> BoxFuture<'static, AssistantResult<Reply>>;
}

/// Answers with keyword-matched templates after a fixed delay.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    reply_delay: Duration,
}

impl CannedResponder {
    pub fn new(reply_delay: Duration) -> Self {
        Self { reply_delay }
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl Responder for CannedResponder {
    fn id(&self) -> &str {
        CANNED_RESPONDER_ID
    }

    fn name(&self) -> &str {
        "Argo Ocean Intelligence"
    }

    fn respond(&self, input: String) -> BoxFuture<'static, AssistantResult<Reply>> {
        let reply_delay = self.reply_delay;
        async move {
            ensure!(
                !input.trim().is_empty(),
                EmptyInputSnafu {
                    stage: "canned-respond"
                }
            );

            if !reply_delay.is_zero() {
                tokio::time::sleep(reply_delay).await;
            }
            Ok(select_response(&input))
        }
        .boxed()
    }
}
