//! RetrievalEngine: the `IRetriever` implementation.

use std::sync::Arc;

use docai_core::config::RetrievalConfig;
use docai_core::constants::FILE_NAME_FIELD;
use docai_core::errors::{DocaiError, DocaiResult, RetrievalError};
use docai_core::models::{MetadataFilter, RetrievedDocument};
use docai_core::traits::{IDocumentRegistry, IRetriever, IVectorIndex};
use docai_observability::tracing_setup::events;
use tracing::debug;

use crate::dedup;
use crate::query;
use crate::targeting::{self, Target};

/// Document-targeted retrieval.
///
/// When the question names a document in the registry, the index is
/// queried inside that document first and other documents only fill the
/// remaining slots. Otherwise a plain similarity query is issued.
pub struct RetrievalEngine {
    index: Arc<dyn IVectorIndex>,
    registry: Arc<dyn IDocumentRegistry>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(
        index: Arc<dyn IVectorIndex>,
        registry: Arc<dyn IDocumentRegistry>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Current registry contents.
    pub fn available_documents(&self) -> DocaiResult<Vec<String>> {
        self.registry.list_documents().map_err(|e| {
            as_retrieval_error(e, |reason| RetrievalError::RegistryUnavailable {
                path: "registry".to_string(),
                reason,
            })
        })
    }

    /// The document `query` is about, if the registry contains one it names.
    pub fn target_for(&self, query: &str) -> DocaiResult<Option<Target>> {
        let documents = self.available_documents()?;
        let normalized = query::normalize(query, &self.config.summary_qualifiers);
        let target = targeting::find_target(&normalized, &documents);
        match &target {
            Some(t) => events::document_targeted(&t.file_name, t.matched_by.as_str()),
            None => debug!(
                normalized_chars = normalized.chars().count(),
                documents = documents.len(),
                "no document targeted"
            ),
        }
        Ok(target)
    }

    fn query_index(
        &self,
        text: &str,
        n: usize,
        filter: Option<&MetadataFilter>,
    ) -> DocaiResult<Vec<RetrievedDocument>> {
        self.index.query(text, n, filter).map_err(|e| {
            as_retrieval_error(e, |reason| RetrievalError::QueryFailed { reason })
        })
    }

    fn retrieve_targeted(
        &self,
        query: &str,
        k: usize,
        target: &Target,
    ) -> DocaiResult<Vec<RetrievedDocument>> {
        let composite = format!("{} {}", target.file_name, query);
        let overfetch = k.saturating_mul(self.config.target_overfetch.max(1));
        let within = MetadataFilter::eq(FILE_NAME_FIELD, target.file_name.as_str());
        let mut results = self.query_index(&composite, overfetch, Some(&within))?;
        debug!(
            target = %target.file_name,
            requested = overfetch,
            returned = results.len(),
            "targeted query"
        );

        if results.len() < k {
            let shortfall = k - results.len();
            let elsewhere = MetadataFilter::ne(FILE_NAME_FIELD, target.file_name.as_str());
            let backfill = self.query_index(query, shortfall, Some(&elsewhere))?;
            debug!(shortfall, returned = backfill.len(), "backfilled from other documents");
            results.extend(backfill);
        }
        Ok(results)
    }
}

impl IRetriever for RetrievalEngine {
    fn retrieve(&self, query: &str, k: usize) -> DocaiResult<Vec<RetrievedDocument>> {
        let _span = docai_observability::retrieval_span!(query.chars().count(), k).entered();
        if k == 0 {
            return Ok(Vec::new());
        }

        let target = self.target_for(query)?;
        let results = match &target {
            Some(t) => self.retrieve_targeted(query, k, t)?,
            None => self.query_index(query, k, None)?,
        };

        let mut results = dedup::by_content(results);
        results.truncate(k);
        events::retrieval_completed(
            k,
            results.len(),
            target.as_ref().map(|t| t.file_name.as_str()),
        );
        Ok(results)
    }
}

/// Keep retrieval errors as they are and wrap anything else.
fn as_retrieval_error(
    err: DocaiError,
    wrap: impl FnOnce(String) -> RetrievalError,
) -> DocaiError {
    match err {
        DocaiError::RetrievalError(_) => err,
        other => wrap(other.to_string()).into(),
    }
}
