use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StorageError {
    #[snafu(display("storage conflict for '{entity}': {details}"))]
    Conflict {
        stage: &'static str,
        entity: &'static str,
        details: String,
    },
    #[snafu(display("conversation lock was poisoned on `{stage}`"))]
    LockPoisoned { stage: &'static str },
}

pub type StorageResult<T> = Result<T, StorageError>;
