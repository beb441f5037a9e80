use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use snafu::ensure;

use super::error::{ConflictSnafu, LockPoisonedSnafu, StorageResult};
use super::ids::{ConversationId, MessageId};
use super::types::{
    ConversationRecord, DEFAULT_CONVERSATION_TITLE, MessageRecord, NewMessage,
    current_unix_timestamp_millis,
};
use super::{ConversationStore, MessageStore};

#[derive(Debug, Default)]
struct Thread {
    messages: Vec<MessageRecord>,
    ids: HashSet<MessageId>,
}

/// Append-only conversation held in memory for the lifetime of one session.
#[derive(Debug)]
pub struct MemoryStorage {
    conversation: ConversationRecord,
    thread: RwLock<Thread>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSATION_TITLE)
    }
}

impl MemoryStorage {
    pub fn new(title: impl Into<String>) -> Self {
        let mut title = title.into().trim().to_string();
        if title.is_empty() {
            title = DEFAULT_CONVERSATION_TITLE.to_string();
        }

        let conversation = ConversationRecord {
            id: ConversationId::new_v7(),
            title,
            created_at_unix_millis: current_unix_timestamp_millis(),
        };
        tracing::debug!(conversation_id = %conversation.id, "opened in-memory conversation");

        Self {
            conversation,
            thread: RwLock::new(Thread::default()),
        }
    }

    fn read_thread(&self, stage: &'static str) -> StorageResult<RwLockReadGuard<'_, Thread>> {
        self.thread
            .read()
            .map_err(|_| LockPoisonedSnafu { stage }.build())
    }

    fn write_thread(&self, stage: &'static str) -> StorageResult<RwLockWriteGuard<'_, Thread>> {
        self.thread
            .write()
            .map_err(|_| LockPoisonedSnafu { stage }.build())
    }
}

impl ConversationStore for MemoryStorage {
    fn conversation(&self) -> &ConversationRecord {
        &self.conversation
    }
}

impl MessageStore for MemoryStorage {
    fn append_message(&self, input: NewMessage) -> StorageResult<MessageRecord> {
        let mut thread = self.write_thread("append-message")?;

        // v7 collisions are not expected, but the uniqueness invariant is checked on every path.
        let mut id = MessageId::new_v7();
        while thread.ids.contains(&id) {
            id = MessageId::new_v7();
        }

        let record = MessageRecord {
            id,
            conversation_id: self.conversation.id,
            seq: thread.messages.len() as u64 + 1,
            role: input.role,
            content: input.content,
            created_at_unix_millis: current_unix_timestamp_millis(),
            image_url: input.image_url,
        };

        thread.ids.insert(record.id);
        thread.messages.push(record.clone());
        tracing::trace!(
            message_id = %record.id,
            seq = record.seq,
            role = record.role.as_str(),
            "appended message"
        );
        Ok(record)
    }

    fn insert_message(&self, record: MessageRecord) -> StorageResult<MessageRecord> {
        let mut thread = self.write_thread("insert-message")?;

        ensure!(
            record.conversation_id == self.conversation.id,
            ConflictSnafu {
                stage: "insert-message-conversation",
                entity: "message",
                details: format!(
                    "record belongs to conversation {} but store holds {}",
                    record.conversation_id, self.conversation.id
                ),
            }
        );
        ensure!(
            !thread.ids.contains(&record.id),
            ConflictSnafu {
                stage: "insert-message-id",
                entity: "message",
                details: format!("id {} already exists", record.id),
            }
        );
        let expected_seq = thread.messages.len() as u64 + 1;
        ensure!(
            record.seq == expected_seq,
            ConflictSnafu {
                stage: "insert-message-seq",
                entity: "message",
                details: format!("expected seq {expected_seq}, got {}", record.seq),
            }
        );

        thread.ids.insert(record.id);
        thread.messages.push(record.clone());
        Ok(record)
    }

    fn list_messages(&self) -> StorageResult<Vec<MessageRecord>> {
        Ok(self.read_thread("list-messages")?.messages.clone())
    }

    fn get_message(&self, message_id: MessageId) -> StorageResult<Option<MessageRecord>> {
        let thread = self.read_thread("get-message")?;
        Ok(thread
            .messages
            .iter()
            .find(|message| message.id == message_id)
            .cloned())
    }

    fn message_count(&self) -> StorageResult<usize> {
        Ok(self.read_thread("message-count")?.messages.len())
    }
}
