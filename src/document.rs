use crate::statics;
use plist::{Dictionary, Value};
use std::io::Cursor;
use std::path::PathBuf;
use thiserror::Error;

/// Parse-side failures. `Corrupt` is a byte-stream problem; `Schema` means the
/// property list decoded fine but does not have the saved-search shape. The
/// presentation layer shows different diagnostics for the two.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("corrupt property list: {0}")]
    Corrupt(#[from] plist::Error),
    #[error("unexpected saved-search structure: {0}")]
    Schema(&'static str),
}

/// Serialize-side failure: the in-memory tree was rejected by the binary
/// encoder. Cannot happen for trees this model itself parsed, but documents
/// can also be constructed programmatically.
#[derive(Debug, Error)]
#[error("could not encode property list: {0}")]
pub struct WriteError(#[from] plist::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Binary,
    Xml,
}

/// A parsed saved-search document.
///
/// The root is always a dictionary containing a `SearchCriteria` dictionary,
/// which in turn holds `FXScopeArrayOfPaths` as an array of absolute path
/// strings; both are guaranteed by construction. Every other key, at any
/// nesting level, is opaque payload and round-trips untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSearchDocument {
    root: Value,
    source_format: PlistFormat,
}

impl SavedSearchDocument {
    /// Decode a saved search from raw file bytes (binary or XML plist).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let source_format = detect_format(bytes);
        let root = Value::from_reader(Cursor::new(bytes))?;
        validate_schema(&root)?;
        Ok(Self {
            root,
            source_format,
        })
    }

    /// An empty criteria skeleton, for "new document".
    pub fn new() -> Self {
        let mut criteria = Dictionary::new();
        criteria.insert(statics::SF_SCOPE_PATHS.to_string(), Value::Array(Vec::new()));

        let mut top = Dictionary::new();
        top.insert(
            statics::SF_SEARCH_CRITERIA.to_string(),
            Value::Dictionary(criteria),
        );

        Self {
            root: Value::Dictionary(top),
            source_format: PlistFormat::Binary,
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Encoding the document was loaded from. Finder accepts both, but we
    /// always write binary back.
    pub fn source_format(&self) -> PlistFormat {
        self.source_format
    }

    /// The scope paths, in document order. Entries are plain absolute path
    /// strings, never percent-encoded URLs.
    pub fn scope_paths(&self) -> Vec<PathBuf> {
        let entries = self
            .criteria()
            .and_then(|c| c.get(statics::SF_SCOPE_PATHS))
            .and_then(Value::as_array);
        let Some(entries) = entries else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(Value::as_string)
            .map(PathBuf::from)
            .collect()
    }

    /// Replace the scope array wholesale. All sibling keys stay untouched.
    pub fn set_scope_paths(&mut self, paths: &[PathBuf]) {
        let entries: Vec<Value> = paths
            .iter()
            .map(|p| Value::String(p.to_string_lossy().into_owned()))
            .collect();

        if let Some(criteria) = self
            .root
            .as_dictionary_mut()
            .and_then(|d| d.get_mut(statics::SF_SEARCH_CRITERIA))
            .and_then(Value::as_dictionary_mut)
        {
            criteria.insert(statics::SF_SCOPE_PATHS.to_string(), Value::Array(entries));
        }
    }

    /// Re-encode the full tree as a binary property list, the encoding Finder
    /// expects for `.savedSearch` files.
    pub fn to_binary_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut out = Vec::new();
        self.root.to_writer_binary(&mut out)?;
        Ok(out)
    }

    fn criteria(&self) -> Option<&Dictionary> {
        self.root
            .as_dictionary()?
            .get(statics::SF_SEARCH_CRITERIA)?
            .as_dictionary()
    }
}

impl Default for SavedSearchDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_schema(root: &Value) -> Result<(), FormatError> {
    let Some(top) = root.as_dictionary() else {
        return Err(FormatError::Schema("root is not a dictionary"));
    };
    let Some(criteria) = top.get(statics::SF_SEARCH_CRITERIA) else {
        return Err(FormatError::Schema("missing SearchCriteria"));
    };
    let Some(criteria) = criteria.as_dictionary() else {
        return Err(FormatError::Schema("SearchCriteria is not a dictionary"));
    };
    let Some(scope) = criteria.get(statics::SF_SCOPE_PATHS) else {
        return Err(FormatError::Schema("missing FXScopeArrayOfPaths"));
    };
    let Some(entries) = scope.as_array() else {
        return Err(FormatError::Schema("FXScopeArrayOfPaths is not an array"));
    };
    if entries.iter().any(|v| v.as_string().is_none()) {
        return Err(FormatError::Schema(
            "FXScopeArrayOfPaths contains a non-string entry",
        ));
    }
    Ok(())
}

fn detect_format(bytes: &[u8]) -> PlistFormat {
    // Binary plist magic: "bplist" (followed by a two-byte version).
    if bytes.starts_with(b"bplist") {
        PlistFormat::Binary
    } else {
        PlistFormat::Xml
    }
}

#[cfg(test)]
mod tests {
    use super::{FormatError, PlistFormat, SavedSearchDocument, detect_format};
    use crate::statics;
    use plist::{Dictionary, Value};
    use std::path::PathBuf;

    fn sample_document_bytes(paths: &[&str]) -> Vec<u8> {
        let scope: Vec<Value> = paths
            .iter()
            .map(|p| Value::String((*p).to_string()))
            .collect();

        let mut criteria = Dictionary::new();
        criteria.insert(statics::SF_SCOPE_PATHS.to_string(), Value::Array(scope));
        criteria.insert(
            "FXEnableSystemFiles".to_string(),
            Value::Boolean(false),
        );

        let mut top = Dictionary::new();
        top.insert("RawQuery".to_string(), Value::String("true".to_string()));
        top.insert(
            statics::SF_SEARCH_CRITERIA.to_string(),
            Value::Dictionary(criteria),
        );

        let mut out = Vec::new();
        Value::Dictionary(top).to_writer_binary(&mut out).unwrap();
        out
    }

    #[test]
    fn detect_format_uses_binary_magic() {
        assert_eq!(detect_format(b"bplist00\x00"), PlistFormat::Binary);
        assert_eq!(detect_format(b"<?xml version"), PlistFormat::Xml);
        assert_eq!(detect_format(b""), PlistFormat::Xml);
    }

    #[test]
    fn new_document_satisfies_the_schema() {
        let doc = SavedSearchDocument::new();
        let bytes = doc.to_binary_bytes().unwrap();
        let reparsed = SavedSearchDocument::from_bytes(&bytes).unwrap();
        assert!(reparsed.scope_paths().is_empty());
    }

    #[test]
    fn scope_paths_round_trip_through_set() {
        let bytes = sample_document_bytes(&["/Users/a/Documents"]);
        let mut doc = SavedSearchDocument::from_bytes(&bytes).unwrap();
        assert_eq!(doc.scope_paths(), vec![PathBuf::from("/Users/a/Documents")]);

        let replacement = vec![
            PathBuf::from("/Users/a/Desktop"),
            PathBuf::from("/Users/a/Music"),
        ];
        doc.set_scope_paths(&replacement);
        assert_eq!(doc.scope_paths(), replacement);

        // Siblings of the scope array are untouched by the replacement.
        let criteria = doc
            .root()
            .as_dictionary()
            .and_then(|d| d.get(statics::SF_SEARCH_CRITERIA))
            .and_then(Value::as_dictionary)
            .unwrap();
        assert_eq!(
            criteria.get("FXEnableSystemFiles"),
            Some(&Value::Boolean(false))
        );
    }

    #[test]
    fn schema_violations_are_reported_as_schema_errors() {
        // Valid plist, but no SearchCriteria at all.
        let mut top = Dictionary::new();
        top.insert("RawQuery".to_string(), Value::String("true".to_string()));
        let mut bytes = Vec::new();
        Value::Dictionary(top).to_writer_binary(&mut bytes).unwrap();

        let err = SavedSearchDocument::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::Schema(_)));
    }

    #[test]
    fn garbage_bytes_are_reported_as_corrupt() {
        let err = SavedSearchDocument::from_bytes(b"not a plist at all").unwrap_err();
        assert!(matches!(err, FormatError::Corrupt(_)));
    }
}
