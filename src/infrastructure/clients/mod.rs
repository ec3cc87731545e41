mod chatgpt;
mod whisper;

pub use chatgpt::ChatGptClient;
pub use whisper::WhisperClient;
