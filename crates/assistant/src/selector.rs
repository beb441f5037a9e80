use super::templates::{
    ARGO_TEMPLATE, ATLANTIC_TEMPLATE, CURRENTS_TEMPLATE, DEFAULT_TEMPLATE, PACIFIC_TEMPLATE,
    SALINITY_TEMPLATE, TEMPERATURE_TEMPLATE,
};

/// Keyword group a reply was chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Pacific,
    Atlantic,
    Temperature,
    Salinity,
    Currents,
    Argo,
    Overview,
}

impl Topic {
    pub fn template(&self) -> &'static str {
        match self {
            Self::Pacific => PACIFIC_TEMPLATE,
            Self::Atlantic => ATLANTIC_TEMPLATE,
            Self::Temperature => TEMPERATURE_TEMPLATE,
            Self::Salinity => SALINITY_TEMPLATE,
            Self::Currents => CURRENTS_TEMPLATE,
            Self::Argo => ARGO_TEMPLATE,
            Self::Overview => DEFAULT_TEMPLATE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pacific => "pacific",
            Self::Atlantic => "atlantic",
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Currents => "currents",
            Self::Argo => "argo",
            Self::Overview => "overview",
        }
    }
}

/// Speaker of a reply. Selector output is always `Assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyRole {
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub topic: Topic,
    pub role: ReplyRole,
    pub content: String,
}

struct ResponseRule {
    topic: Topic,
    keywords: &'static [&'static str],
}

impl ResponseRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
    }
}

// First match wins; order matters more than specificity.
const RULES: &[ResponseRule] = &[
    ResponseRule {
        topic: Topic::Pacific,
        keywords: &["pacific"],
    },
    ResponseRule {
        topic: Topic::Atlantic,
        keywords: &["atlantic"],
    },
    ResponseRule {
        topic: Topic::Temperature,
        keywords: &["temperature", "temp"],
    },
    ResponseRule {
        topic: Topic::Salinity,
        keywords: &["salinity", "salt"],
    },
    ResponseRule {
        topic: Topic::Currents,
        keywords: &["current", "circulation"],
    },
    ResponseRule {
        topic: Topic::Argo,
        keywords: &["argo", "float"],
    },
];

/// Returns the keyword group `input` falls into, or `Topic::Overview`.
pub fn classify(input: &str) -> Topic {
    let normalized = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&normalized))
        .map(|rule| rule.topic)
        .unwrap_or(Topic::Overview)
}

/// Picks the canned reply for `input`. Pure; never fails.
pub fn select_response(input: &str) -> Reply {
    let topic = classify(input);
    tracing::debug!(topic = topic.as_str(), "selected canned reply");
    Reply {
        topic,
        role: ReplyRole::Assistant,
        content: topic.template().to_string(),
    }
}
