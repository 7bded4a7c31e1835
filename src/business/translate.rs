//! Natural language to SQL
//!
//! The model is an external collaborator behind [`TextGenerator`]. Its
//! output is returned for review and never executed here.

use tracing::{info, warn};
use crate::error::{ManagerError, Result};

/// Error type generators may return
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// Text-to-text model boundary
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> std::result::Result<String, GeneratorError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> std::result::Result<String, GeneratorError>,
{
    fn generate(&self, prompt: &str) -> std::result::Result<String, GeneratorError> {
        self(prompt)
    }
}

/// Build the model prompt for a natural language request
pub fn build_prompt(text: &str) -> String {
    format!("{}{}", crate::TRANSLATION_PROMPT_PREFIX, text.trim())
}

/// Translate `text` into SQL with a single generator call
///
/// Blank input is rejected without calling the generator. Generator
/// failures and empty output become [`ManagerError::Translation`].
pub fn translate(generator: &dyn TextGenerator, text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Err(ManagerError::InvalidInput("enter a request to translate".to_string()));
    }

    let sql = generator.generate(&build_prompt(text)).map_err(|e| {
        warn!(error = %e, "text generator failed");
        ManagerError::Translation(e.to_string())
    })?;

    let sql = sql.trim();
    if sql.is_empty() {
        return Err(ManagerError::Translation("the model returned no SQL".to_string()));
    }

    info!(chars = sql.len(), "natural language request translated");
    Ok(sql.to_string())
}
