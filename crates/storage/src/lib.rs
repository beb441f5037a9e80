pub mod error;
pub mod ids;
pub mod memory;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use ids::{ConversationId, MessageId};
pub use memory::MemoryStorage;
pub use types::{
    ConversationRecord, DEFAULT_CONVERSATION_TITLE, MessageRecord, MessageRole, NewMessage,
};

pub trait ConversationStore: Send + Sync {
    fn conversation(&self) -> &ConversationRecord;
}

/// Append-only message thread. Records are never updated or removed.
pub trait MessageStore: Send + Sync {
    fn append_message(&self, input: NewMessage) -> StorageResult<MessageRecord>;
    fn insert_message(&self, record: MessageRecord) -> StorageResult<MessageRecord>;
    fn list_messages(&self) -> StorageResult<Vec<MessageRecord>>;
    fn get_message(&self, message_id: MessageId) -> StorageResult<Option<MessageRecord>>;
    fn message_count(&self) -> StorageResult<usize>;
}
