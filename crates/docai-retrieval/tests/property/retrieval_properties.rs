use std::sync::Arc;

use docai_core::config::{IndexConfig, RetrievalConfig};
use docai_core::models::{ChunkMetadata, ChunkRecord};
use docai_core::traits::{IRetriever, IVectorIndex};
use docai_index::MemoryVectorIndex;
use docai_retrieval::query::normalize;
use docai_retrieval::{RetrievalEngine, StaticRegistry};
use proptest::prelude::*;

const FILES: [&str; 3] = ["薪資單.pdf", "請假規定.docx", "員工手冊.pdf"];

fn engine_with(contents: &[(usize, String)]) -> RetrievalEngine {
    let index = MemoryVectorIndex::from_config(&IndexConfig {
        dimensions: 64,
        ..Default::default()
    })
    .unwrap();
    let records: Vec<ChunkRecord> = contents
        .iter()
        .enumerate()
        .map(|(i, (file, content))| ChunkRecord {
            id: format!("r{i}"),
            content: content.clone(),
            content_hash: String::new(),
            metadata: ChunkMetadata::for_file(FILES[*file]),
        })
        .collect();
    index.add(&records).unwrap();
    RetrievalEngine::new(
        Arc::new(index),
        Arc::new(StaticRegistry::new(FILES)),
        RetrievalConfig::default(),
    )
}

proptest! {
    #[test]
    fn result_count_never_exceeds_k(
        contents in prop::collection::vec((0usize..3, "[a-z薪資請假 ]{0,20}"), 0..15),
        query in "[a-z薪資單請假 ]{0,12}",
        k in 0usize..8,
    ) {
        let engine = engine_with(&contents);
        let results = engine.retrieve(&query, k).unwrap();
        prop_assert!(results.len() <= k);
    }

    #[test]
    fn results_are_deterministic_and_unique(
        contents in prop::collection::vec((0usize..3, "[a-z薪資請假 ]{0,20}"), 1..15),
        query in "[a-z薪資單請假 ]{0,12}",
        k in 1usize..6,
    ) {
        let engine = engine_with(&contents);
        let first = engine.retrieve(&query, k).unwrap();
        let second = engine.retrieve(&query, k).unwrap();
        prop_assert_eq!(&first, &second);

        let mut seen = std::collections::HashSet::new();
        for r in &first {
            prop_assert!(seen.insert(r.content.clone()));
        }
    }

    #[test]
    fn normalize_is_idempotent(query in "\\PC{0,30}") {
        let qualifiers = vec!["的摘要".to_string(), "summary".to_string()];
        let once = normalize(&query, &qualifiers);
        prop_assert_eq!(normalize(&once, &qualifiers), once.clone());
    }
}
