//! Prompt composition for the generative model.

use crate::conversation::Turn;

/// Instruction placed at the top of every prompt.
pub const PREAMBLE: &str = "請使用中文回答以下問題，並仔細參考之前的對話歷史。在你的回答中，考慮先前人類提出的問題以及你給出的答案，以確保回答的連貫性。不要使用英文。";

pub const HISTORY_HEADING: &str = "之前的對話：";
pub const CONTEXT_HEADING: &str = "上下文：";
pub const QUESTION_PREFIX: &str = "人類：";

/// Build the full prompt.
///
/// Layout: preamble, blank line, optional history block, optional context
/// block (already redacted chunks joined by newlines), then the question.
/// Empty `history` or `context` omits the whole block.
pub fn compose(question: &str, history: &[Turn], context: &[String]) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + question.len() + 64);
    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    if !history.is_empty() {
        prompt.push_str(HISTORY_HEADING);
        prompt.push('\n');
        for turn in history {
            prompt.push_str(turn.role.as_str());
            prompt.push_str(": ");
            prompt.push_str(&turn.content);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    if !context.is_empty() {
        prompt.push_str(CONTEXT_HEADING);
        prompt.push('\n');
        prompt.push_str(&context.join("\n"));
        prompt.push_str("\n\n");
    }

    prompt.push_str(QUESTION_PREFIX);
    prompt.push_str(question);
    prompt
}
