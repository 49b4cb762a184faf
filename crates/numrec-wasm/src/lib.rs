//! WASM bindings for multilingual number recognition.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.

use wasm_bindgen::prelude::*;

use numrec_core::models::{CacheConfig, ExtractionOptions};
use numrec_core::{Culture, NumberRecognizer, ParseResult, RecognizerKind};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Supported culture codes.
#[wasm_bindgen]
pub fn cultures() -> Vec<String> {
    Culture::ALL.iter().map(|c| c.code().to_string()).collect()
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js(results: &[ParseResult]) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(results).map_err(js_error)
}

/// Recognize one kind of quantity ("number", "ordinal", "percentage", "range",
/// "currency") in text.
///
/// Builds a recognizer per call; use [`Recognizer`] for repeated calls.
#[wasm_bindgen]
pub fn recognize(text: &str, culture: &str, kind: &str) -> Result<JsValue, JsValue> {
    let culture: Culture = culture.parse().map_err(js_error)?;
    let kind: RecognizerKind = kind.parse().map_err(js_error)?;

    let results = NumberRecognizer::new(culture)
        .recognize(kind, text)
        .map_err(js_error)?;
    to_js(&results)
}

/// Recognizer class for browser use.
#[wasm_bindgen]
pub struct Recognizer {
    inner: NumberRecognizer,
}

#[wasm_bindgen]
impl Recognizer {
    /// Create a recognizer for a culture code such as "en-us" or "zh-cn".
    #[wasm_bindgen(constructor)]
    pub fn new(culture: &str) -> Result<Recognizer, JsValue> {
        let culture: Culture = culture.parse().map_err(js_error)?;
        Ok(Self {
            inner: NumberRecognizer::new(culture),
        })
    }

    /// Create a recognizer from a JSON options object
    /// (`suppress_extended_types`, `experimental_mode`, `match_budget_ms`).
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(culture: &str, options: JsValue) -> Result<Recognizer, JsValue> {
        let culture: Culture = culture.parse().map_err(js_error)?;
        let options: ExtractionOptions = if options.is_undefined() || options.is_null() {
            ExtractionOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(js_error)?
        };
        let cache = CacheConfig {
            enabled: true,
            ..Default::default()
        };
        Ok(Self {
            inner: NumberRecognizer::with_options(culture, options, &cache),
        })
    }

    /// Culture code of this recognizer.
    #[wasm_bindgen(getter)]
    pub fn culture(&self) -> String {
        self.inner.culture().code().to_string()
    }

    /// Recognize one kind of quantity.
    #[wasm_bindgen]
    pub fn recognize(&self, text: &str, kind: &str) -> Result<JsValue, JsValue> {
        let kind: RecognizerKind = kind.parse().map_err(js_error)?;
        let results = self.inner.recognize(kind, text).map_err(js_error)?;
        to_js(&results)
    }

    /// Recognize every kind; returns an object keyed by kind name.
    #[wasm_bindgen(js_name = recognizeAll)]
    pub fn recognize_all(&self, text: &str) -> Result<JsValue, JsValue> {
        let all: std::collections::BTreeMap<&'static str, Vec<ParseResult>> = self
            .inner
            .recognize_all(text)
            .map_err(js_error)?
            .into_iter()
            .map(|(kind, results)| (kind.as_str(), results))
            .collect();
        serde_wasm_bindgen::to_value(&all).map_err(js_error)
    }

    /// Spans of one kind, without values.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, kind: &str) -> Result<JsValue, JsValue> {
        let kind: RecognizerKind = kind.parse().map_err(js_error)?;
        serde_wasm_bindgen::to_value(&self.inner.extract(kind, text)).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_cultures() {
        assert_eq!(cultures(), vec!["en-us".to_string(), "zh-cn".to_string()]);
    }
}
