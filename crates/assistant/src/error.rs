use snafu::Snafu;

pub type AssistantResult<T> = Result<T, AssistantError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AssistantError {
    #[snafu(display("cannot respond to empty input on `{stage}`"))]
    EmptyInput { stage: &'static str },
    #[snafu(display("cannot generate an image from an empty prompt on `{stage}`"))]
    EmptyPrompt { stage: &'static str },
    #[snafu(display("responder '{responder_id}' is not supported"))]
    UnsupportedResponder {
        stage: &'static str,
        responder_id: String,
    },
}
