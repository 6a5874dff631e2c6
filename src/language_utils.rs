use anyhow::{Result, anyhow};
use isolang::Language;

// @module: ISO 639-1 language code utilities

/// Sentinel code accepted for the source language when the provider should
/// detect it
pub const AUTO_LANGUAGE: &str = "auto";

// @checks: That a code is "auto" or a valid ISO 639-1 two-letter code
pub fn validate_language_code(code: &str) -> Result<()> {
    if code.eq_ignore_ascii_case(AUTO_LANGUAGE) {
        return Ok(());
    }
    if code.len() != 2 {
        return Err(anyhow!("Language code must be two letters (ISO 639-1): {}", code));
    }
    Language::from_639_1(&code.to_lowercase())
        .map(|_| ())
        .ok_or_else(|| anyhow!("Unknown ISO 639-1 language code: {}", code))
}

// @returns: English display name for an ISO 639-1 code
pub fn get_language_name(code: &str) -> Result<String> {
    if code.eq_ignore_ascii_case(AUTO_LANGUAGE) {
        return Ok("auto-detected".to_string());
    }
    Language::from_639_1(&code.to_lowercase())
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Unknown ISO 639-1 language code: {}", code))
}
