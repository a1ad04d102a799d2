use docai_core::config::IndexConfig;
use docai_core::models::{ChunkMetadata, ChunkRecord, MetadataFilter};
use docai_core::traits::{IEmbeddingProvider, IVectorIndex};
use docai_index::{HashedTfIdfEmbedder, MemoryVectorIndex};
use proptest::prelude::*;

proptest! {
    #[test]
    fn embeddings_are_unit_or_zero(text in "\\PC{0,80}") {
        let embedder = HashedTfIdfEmbedder::new(64).unwrap();
        let v = embedder.embed(&text).unwrap();
        prop_assert_eq!(v.len(), 64);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn query_respects_n_and_filter(
        files in prop::collection::vec(0u8..4, 0..20),
        n in 0usize..10,
    ) {
        let index = MemoryVectorIndex::from_config(&IndexConfig { dimensions: 32, ..Default::default() }).unwrap();
        let records: Vec<ChunkRecord> = files
            .iter()
            .enumerate()
            .map(|(i, f)| ChunkRecord {
                id: format!("r{i}"),
                content: format!("chunk {i} of file {f}"),
                content_hash: String::new(),
                metadata: ChunkMetadata::for_file(format!("f{f}.pdf")),
            })
            .collect();
        index.add(&records).unwrap();

        let filter = MetadataFilter::ne("file_name", "f0.pdf");
        let results = index.query("chunk of file", n, Some(&filter)).unwrap();
        let eligible = files.iter().filter(|f| **f != 0).count();
        prop_assert_eq!(results.len(), n.min(eligible));
        prop_assert!(results.iter().all(|r| r.metadata.file_name != "f0.pdf"));
    }
}
