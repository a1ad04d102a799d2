/// docai version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Metadata field that carries a chunk's originating file name.
pub const FILE_NAME_FIELD: &str = "file_name";

/// Source label shown when a retrieved document has no file name.
pub const UNKNOWN_SOURCE: &str = "未知文件";

/// Answer returned when the generative model call fails.
pub const GENERATION_FALLBACK_ANSWER: &str = "無法生成回答";

/// Answer returned when the whole question-answering pass fails.
pub const PIPELINE_FALLBACK_ANSWER: &str = "無法生成回答，請檢查問題或向量資料庫。";

/// File extensions the document pool accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["pdf", "docx"];
