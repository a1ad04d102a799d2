use crate::errors::DocaiResult;
use crate::models::GenerationParams;

/// A generative language model reached over the network.
pub trait IGenerativeModel: Send + Sync {
    /// Generate text for a fully composed prompt.
    fn generate(&self, prompt: &str, params: &GenerationParams) -> DocaiResult<String>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}
