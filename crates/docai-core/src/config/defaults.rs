// Single source of truth for all default values.

// --- Ingestion ---
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;
pub const DEFAULT_CONTENT_HEADER: bool = true;
pub const DEFAULT_DOCUMENT_DIR: &str = "./KM_pool";

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_TARGET_OVERFETCH: usize = 2;
pub const DEFAULT_SUMMARY_QUALIFIERS: [&str; 2] = ["的摘要", "summary"];

// --- Privacy ---
pub const DEFAULT_NER_ENABLED: bool = true;
pub const DEFAULT_NER_MODEL_PATH: &str = "./bert-base-chinese-ner";
pub const DEFAULT_SENSITIVE_LABELS: [&str; 5] = ["PERSON", "ORG", "PHONE", "EMAIL", "NORP"];
pub const DEFAULT_REPLACEMENT_TOKEN: &str = "[REDACTED]";

// --- Index ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Generation ---
pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-1.5-flash:generateContent";
pub const DEFAULT_TEMPERATURE: f32 = 0.8;
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const DEFAULT_GENERATION_TOP_K: u32 = 60;
pub const DEFAULT_GENERATION_TOP_P: f32 = 0.9;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
