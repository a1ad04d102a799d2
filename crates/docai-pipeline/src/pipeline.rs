//! QaPipeline: one question in, one redacted answer out.

use std::sync::{Arc, Mutex};

use docai_core::config::DocaiConfig;
use docai_core::constants::{GENERATION_FALLBACK_ANSWER, PIPELINE_FALLBACK_ANSWER};
use docai_core::models::{GenerationParams, RetrievedDocument};
use docai_core::traits::{IDocumentRegistry, IGenerativeModel, IRetriever, ISanitizer};
use docai_observability::tracing_setup::events;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::conversation::{ConversationBuffer, Turn};
use crate::prompt;

/// Which stages of an `ask` succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerStatus {
    pub retrieval_ok: bool,
    pub generation_ok: bool,
    /// Some redaction ran without the learned model, or a context chunk was
    /// withheld because it could not be redacted.
    pub redaction_degraded: bool,
}

impl AnswerStatus {
    pub fn is_degraded(&self) -> bool {
        !self.retrieval_ok || !self.generation_ok || self.redaction_degraded
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Redacted answer text, possibly a fallback message.
    pub text: String,
    /// Documents retrieved for the question, as stored in the index.
    pub sources: Vec<RetrievedDocument>,
    pub status: AnswerStatus,
}

impl Answer {
    fn failed() -> Self {
        Self {
            text: PIPELINE_FALLBACK_ANSWER.to_string(),
            sources: Vec::new(),
            status: AnswerStatus::default(),
        }
    }
}

/// Conversational question answering over redacted retrieval context.
///
/// Collaborator failures never escape `ask`: retrieval failure means no
/// context, generation failure means the fallback answer.
pub struct QaPipeline {
    retriever: Arc<dyn IRetriever>,
    sanitizer: Arc<dyn ISanitizer>,
    generator: Arc<dyn IGenerativeModel>,
    registry: Option<Arc<dyn IDocumentRegistry>>,
    params: GenerationParams,
    top_k: usize,
    history: Mutex<ConversationBuffer>,
}

impl QaPipeline {
    pub fn new(
        retriever: Arc<dyn IRetriever>,
        sanitizer: Arc<dyn ISanitizer>,
        generator: Arc<dyn IGenerativeModel>,
        config: &DocaiConfig,
    ) -> Self {
        Self {
            retriever,
            sanitizer,
            generator,
            registry: None,
            params: config.generation.params(),
            top_k: config.retrieval.top_k,
            history: Mutex::new(ConversationBuffer::new()),
        }
    }

    /// Registry used to suggest document names when a summary request
    /// finds nothing.
    pub fn with_registry(mut self, registry: Arc<dyn IDocumentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Snapshot of the conversation so far.
    pub fn history(&self) -> Vec<Turn> {
        match self.history.lock() {
            Ok(history) => history.turns().to_vec(),
            Err(poisoned) => poisoned.into_inner().turns().to_vec(),
        }
    }

    pub fn clear_history(&self) {
        match self.history.lock() {
            Ok(mut history) => history.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }

    pub fn ask(&self, question: &str) -> Answer {
        let history = match self.history.lock() {
            Ok(history) => history.turns().to_vec(),
            Err(e) => {
                warn!(error = %e, "conversation history unavailable");
                return Answer::failed();
            }
        };
        let mut status = AnswerStatus::default();

        let sources = match self.retriever.retrieve(question, self.top_k) {
            Ok(docs) => {
                status.retrieval_ok = true;
                docs
            }
            Err(e) => {
                warn!(error = %e, "retrieval failed, answering without context");
                Vec::new()
            }
        };

        let context = self.redacted_context(&sources, &mut status);
        let prompt = prompt::compose(question, &history, &context);
        debug!(context_chunks = context.len(), history_turns = history.len(), "prompt composed");

        let raw = match self.generator.generate(&prompt, &self.params) {
            Ok(text) => {
                status.generation_ok = true;
                text
            }
            Err(e) => {
                events::generation_fallback(self.generator.name(), &e.to_string());
                GENERATION_FALLBACK_ANSWER.to_string()
            }
        };

        let mut text = match self.sanitizer.sanitize(&raw) {
            Ok(sanitized) => {
                status.redaction_degraded |= sanitized.degraded;
                sanitized.text
            }
            Err(e) => {
                warn!(error = %e, "answer redaction failed");
                return Answer::failed();
            }
        };

        if sources.is_empty() && question.to_lowercase().contains("摘要") {
            text.push_str(&self.summary_hint());
        }

        match self.history.lock() {
            Ok(mut buffer) => buffer.record_exchange(question, text.as_str()),
            Err(e) => warn!(error = %e, "could not record conversation turn"),
        }

        info!(
            sources = sources.len(),
            retrieval_ok = status.retrieval_ok,
            generation_ok = status.generation_ok,
            "question answered"
        );
        Answer {
            text,
            sources,
            status,
        }
    }

    /// Redact every retrieved chunk against its own content. A chunk that
    /// cannot be redacted is left out of the prompt.
    fn redacted_context(
        &self,
        sources: &[RetrievedDocument],
        status: &mut AnswerStatus,
    ) -> Vec<String> {
        let mut context = Vec::with_capacity(sources.len());
        for doc in sources {
            match self.sanitizer.sanitize(&doc.content) {
                Ok(sanitized) => {
                    status.redaction_degraded |= sanitized.degraded;
                    context.push(sanitized.text);
                }
                Err(e) => {
                    warn!(source = %doc.source(), error = %e, "withholding chunk that failed redaction");
                    status.redaction_degraded = true;
                }
            }
        }
        context
    }

    fn summary_hint(&self) -> String {
        let documents = match &self.registry {
            Some(registry) => registry.list_documents().unwrap_or_else(|e| {
                warn!(error = %e, "document registry unavailable for hint");
                Vec::new()
            }),
            None => Vec::new(),
        };
        let example = documents.first().map(String::as_str).unwrap_or("文件名");
        format!(
            "\n\n⚠️ 無法找到與問題直接相關的文件片段。請嘗試更明確地指定您想查詢的文件名稱，例如：「{example} 的摘要」。可用文件：{}",
            documents.join(", ")
        )
    }
}
