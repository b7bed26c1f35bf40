//! Approximate token accounting
//!
//! Tokens are counted as whitespace-separated words. This is not a real
//! tokenizer and only gives clients a rough size of each side.

use flowserve_workflow::Message;

use crate::protocol::openai::UsageInfo;

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Words across every message of a prompt history
pub fn prompt_tokens(history: &[Message]) -> u64 {
    history.iter().map(|message| word_count(&message.content)).sum()
}

/// Usage for a prompt of `prompt_tokens` words and the reply generated for it
pub fn usage(prompt_tokens: u64, reply: &str) -> UsageInfo {
    UsageInfo::new(prompt_tokens, word_count(reply))
}
