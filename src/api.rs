use crate::ast::Document;
use crate::error::JsonError;
use crate::parser::{ParseOptions, Parser};
use crate::value::Value;
use serde::{Serialize, Serializer};

/// The result of a successful parse: the value tree and the AST built
/// alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub value: Value,
    pub document: Document,
}

impl Serialize for Analysis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl Analysis {
    /// Serializes the value into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the value into a single-line JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self)
    }

    /// Serializes the value into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }

    /// Dumps the AST, positions included, as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn ast_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.document)
    }

    pub fn into_parts(self) -> (Value, Document) {
        (self.value, self.document)
    }
}

/// Parses `source` with the default options.
///
/// # Errors
///
/// Returns a `JsonError` on the first lexical or syntax error.
pub fn parse(source: &str) -> Result<(Value, Document), JsonError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parses `source` with explicit options.
///
/// # Errors
///
/// Returns a `JsonError` on the first lexical or syntax error.
pub fn parse_with_options(
    source: &str,
    options: &ParseOptions,
) -> Result<(Value, Document), JsonError> {
    Parser::with_options(source, "source.json".to_string(), options.clone())?.parse_document()
}

/// Parses a JSON document and wraps the result for serialization.
///
/// # Arguments
///
/// * `source` - The JSON text.
/// * `file_name` - The name of the document, used in diagnostics.
///
/// # Errors
///
/// Returns a `JsonError` if lexing or parsing fails.
pub fn analyze(source: &str, file_name: &str) -> Result<Analysis, JsonError> {
    analyze_with_options(source, file_name, &ParseOptions::default())
}

/// Like [`analyze`], with explicit options.
///
/// # Errors
///
/// Returns a `JsonError` if lexing or parsing fails.
pub fn analyze_with_options(
    source: &str,
    file_name: &str,
    options: &ParseOptions,
) -> Result<Analysis, JsonError> {
    let mut parser = Parser::with_options(source, file_name.to_string(), options.clone())?;
    let (value, document) = parser.parse_document()?;
    Ok(Analysis { value, document })
}
