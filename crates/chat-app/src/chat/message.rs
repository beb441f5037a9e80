use argo_storage::ConversationId;

/// Monotonic counter distinguishing requests within one conversation.
///
/// Bumped on every accepted submit so late timer results can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Routing key for one delayed assistant reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyTarget {
    pub conversation_id: ConversationId,
    pub seq: RequestSeq,
}

impl ReplyTarget {
    pub const fn new(conversation_id: ConversationId, seq: RequestSeq) -> Self {
        Self {
            conversation_id,
            seq,
        }
    }
}

/// Routing key for one simulated image generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageTarget {
    pub conversation_id: ConversationId,
    pub seq: RequestSeq,
}

impl ImageTarget {
    pub const fn new(conversation_id: ConversationId, seq: RequestSeq) -> Self {
        Self {
            conversation_id,
            seq,
        }
    }
}

/// Lifecycle of the assistant reply for the active conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Idle,
    Pending(ReplyTarget),
    Done(ReplyTarget),
    Failed {
        target: ReplyTarget,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTransition {
    Start(ReplyTarget),
    Complete(ReplyTarget),
    Fail {
        target: ReplyTarget,
        message: String,
    },
    ResetToIdle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTransitionRejection {
    AlreadyPending {
        active: ReplyTarget,
        attempted: ReplyTarget,
    },
    NoPendingReply,
    TargetMismatch {
        active: ReplyTarget,
        attempted: ReplyTarget,
    },
}

pub type ReplyTransitionResult = Result<ReplyState, ReplyTransitionRejection>;

impl ReplyState {
    pub fn pending_target(&self) -> Option<ReplyTarget> {
        match self {
            Self::Pending(target) => Some(*target),
            Self::Idle | Self::Done(_) | Self::Failed { .. } => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_target().is_some()
    }

    /// True when a delivered reply belongs to the request still being waited on.
    pub fn accepts_reply(&self, target: ReplyTarget) -> bool {
        matches!(self, Self::Pending(active) if *active == target)
    }

    /// Non-pending states may start directly; terminal transitions must name the pending target.
    pub fn apply(&self, transition: ReplyTransition) -> ReplyTransitionResult {
        match transition {
            ReplyTransition::Start(target) => self.apply_start(target),
            ReplyTransition::Complete(target) => {
                self.require_pending(target).map(|_| Self::Done(target))
            }
            ReplyTransition::Fail { target, message } => self
                .require_pending(target)
                .map(|_| Self::Failed { target, message }),
            ReplyTransition::ResetToIdle => Ok(Self::Idle),
        }
    }

    fn apply_start(&self, target: ReplyTarget) -> ReplyTransitionResult {
        match self {
            Self::Pending(active) if *active != target => {
                Err(ReplyTransitionRejection::AlreadyPending {
                    active: *active,
                    attempted: target,
                })
            }
            Self::Pending(_) => Ok(self.clone()),
            Self::Idle | Self::Done(_) | Self::Failed { .. } => Ok(Self::Pending(target)),
        }
    }

    fn require_pending(&self, target: ReplyTarget) -> Result<(), ReplyTransitionRejection> {
        match self {
            Self::Pending(active) if *active == target => Ok(()),
            Self::Pending(active) => Err(ReplyTransitionRejection::TargetMismatch {
                active: *active,
                attempted: target,
            }),
            Self::Idle | Self::Done(_) | Self::Failed { .. } => {
                Err(ReplyTransitionRejection::NoPendingReply)
            }
        }
    }
}
