//! ONNX Runtime token classifier (feature `onnx-ner`).
//!
//! Loads a BERT-style token-classification export from a model directory:
//! `model.onnx`, `tokenizer.json`, and the `config.json` carrying `id2label`.
//! Inputs longer than the model's position limit are labeled in overlapping
//! windows (see [`crate::windowing`]).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use docai_core::errors::{DocaiResult, ModelError};
use docai_core::models::LabeledToken;
use docai_core::traits::ISequenceLabeler;
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use tokenizers::Tokenizer;
use tracing::debug;

use crate::windowing::{label_in_windows, MAX_WINDOW_TOKENS, WINDOW_OVERLAP};

#[derive(Debug, Deserialize)]
struct ModelConfig {
    id2label: HashMap<String, String>,
}

/// Sequence labeler backed by an ONNX token-classification model.
pub struct OnnxTokenClassifier {
    /// `run` needs `&mut Session`.
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    id2label: Vec<String>,
    cls_id: u32,
    sep_id: u32,
    model_name: String,
}

impl OnnxTokenClassifier {
    /// Load the model, tokenizer and label map from `model_dir`.
    ///
    /// # Errors
    /// Returns `ModelError::LoadFailed` if any of the three files is missing
    /// or unreadable.
    pub fn load(model_dir: &str) -> DocaiResult<Self> {
        let dir = Path::new(model_dir);
        let load_failed = |reason: String| ModelError::LoadFailed {
            path: model_dir.to_string(),
            reason,
        };

        let model_file = dir.join("model.onnx");
        if !model_file.exists() {
            return Err(load_failed("model.onnx not found".to_string()).into());
        }

        let config_text = std::fs::read_to_string(dir.join("config.json"))
            .map_err(|e| load_failed(format!("config.json: {e}")))?;
        let config: ModelConfig = serde_json::from_str(&config_text)
            .map_err(|e| load_failed(format!("config.json: {e}")))?;
        let id2label = label_table(&config.id2label).map_err(load_failed)?;

        let tokenizer = Tokenizer::from_file(dir.join("tokenizer.json"))
            .map_err(|e| load_failed(format!("tokenizer.json: {e}")))?;

        let special_id = |token: &str| {
            tokenizer
                .token_to_id(token)
                .ok_or_else(|| load_failed(format!("tokenizer.json: no {token} token")))
        };
        let cls_id = special_id("[CLS]")?;
        let sep_id = special_id("[SEP]")?;

        let session = Session::builder()
            .map_err(|e| load_failed(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e| load_failed(e.to_string()))?
            .commit_from_file(&model_file)
            .map_err(|e| load_failed(e.to_string()))?;

        let model_name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-ner")
            .to_string();

        debug!(model = %model_name, labels = id2label.len(), "token classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            id2label,
            cls_id,
            sep_id,
            model_name,
        })
    }

    fn infer(&self, text: &str) -> DocaiResult<Vec<LabeledToken>> {
        let failed = |reason: String| ModelError::InferenceFailed { reason };

        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| failed(format!("tokenization failed: {e}")))?;
        let ids = encoding.get_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self
            .session
            .lock()
            .map_err(|e| failed(format!("session lock poisoned: {e}")))?;

        let tokens = label_in_windows(
            encoding.get_offsets(),
            MAX_WINDOW_TOKENS,
            WINDOW_OVERLAP,
            |window| self.run_window(&mut session, &ids[window]),
        )?;
        debug!(model = %self.model_name, tokens = ids.len(), "token classification done");
        Ok(tokens)
    }

    /// Run one window framed by `[CLS]` and `[SEP]`; one prediction per
    /// window token.
    fn run_window(&self, session: &mut Session, window: &[u32]) -> DocaiResult<Vec<(String, f64)>> {
        let failed = |reason: String| ModelError::InferenceFailed { reason };

        let mut input_ids = Vec::with_capacity(window.len() + 2);
        input_ids.push(self.cls_id as i64);
        input_ids.extend(window.iter().map(|&id| id as i64));
        input_ids.push(self.sep_id as i64);
        let seq_len = input_ids.len();

        let shape = vec![1i64, seq_len as i64];
        let ids = Tensor::from_array((shape.clone(), input_ids))
            .map_err(|e| failed(format!("tensor creation error: {e}")))?;
        let mask = Tensor::from_array((shape.clone(), vec![1i64; seq_len]))
            .map_err(|e| failed(format!("tensor creation error: {e}")))?;
        let types = Tensor::from_array((shape, vec![0i64; seq_len]))
            .map_err(|e| failed(format!("tensor creation error: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids,
                "attention_mask" => mask,
                "token_type_ids" => types,
            ])
            .map_err(|e| failed(e.to_string()))?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| failed("no output tensor".to_string()))?;
        let (out_shape, logits) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| failed(format!("tensor extraction failed: {e}")))?;

        // [batch=1, seq, num_labels]
        if out_shape.len() != 3 || out_shape[1] as usize != seq_len {
            return Err(failed(format!("unexpected output shape: {out_shape:?}")).into());
        }
        let num_labels = out_shape[2] as usize;

        // Skip the [CLS] row; stop before [SEP].
        Ok((1..seq_len - 1)
            .map(|i| {
                let row = &logits[i * num_labels..(i + 1) * num_labels];
                let (best, score) = softmax_argmax(row);
                let label = self
                    .id2label
                    .get(best)
                    .cloned()
                    .unwrap_or_else(|| "O".to_string());
                (label, score)
            })
            .collect())
    }
}

impl ISequenceLabeler for OnnxTokenClassifier {
    fn label(&self, text: &str) -> DocaiResult<Vec<LabeledToken>> {
        self.infer(text)
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Dense label table indexed by class id.
fn label_table(id2label: &HashMap<String, String>) -> Result<Vec<String>, String> {
    let mut table = vec![String::new(); id2label.len()];
    for (id, label) in id2label {
        let idx: usize = id
            .parse()
            .map_err(|_| format!("config.json: non-numeric label id {id:?}"))?;
        let slot = table
            .get_mut(idx)
            .ok_or_else(|| format!("config.json: label id {idx} out of range"))?;
        *slot = label.clone();
    }
    Ok(table)
}

/// Index and probability of the most likely class.
fn softmax_argmax(logits: &[f32]) -> (usize, f64) {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = logits.iter().map(|&l| ((l - max) as f64).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, &e)| (i, if sum > 0.0 { e / sum } else { 0.0 }))
        .unwrap_or((0, 0.0))
}
