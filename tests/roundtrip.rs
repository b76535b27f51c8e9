use plist::{Dictionary, Value};
use pretty_assertions::assert_eq;
use smartscope::{FinderControl, PlistFormat, SavedSearchEditor, statics};
use std::path::Path;
use std::time::SystemTime;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

struct NullFinder;

impl FinderControl for NullFinder {
    fn request_refresh(&self) {}
    fn hide_extension(&self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

/// A saved search the way Finder writes one: the two keys we understand plus
/// opaque payload of every plist value type.
fn sample_saved_search(paths: &[&str]) -> Value {
    let scope: Vec<Value> = paths
        .iter()
        .map(|p| Value::String((*p).to_string()))
        .collect();

    let mut slice = Dictionary::new();
    slice.insert("criteriaSlice".to_string(), Value::Boolean(true));
    slice.insert(
        "displayValues".to_string(),
        Value::Array(vec![Value::String("Any".to_string())]),
    );

    let mut criteria = Dictionary::new();
    criteria.insert(
        "FXCriteriaSlices".to_string(),
        Value::Array(vec![Value::Dictionary(slice)]),
    );
    criteria.insert(statics::SF_SCOPE_PATHS.to_string(), Value::Array(scope));
    criteria.insert("FXEnableSystemFiles".to_string(), Value::Boolean(false));

    let mut query_dict = Dictionary::new();
    query_dict.insert("UserQuery".to_string(), Value::String("kind:folder".to_string()));
    query_dict.insert("QueryBlob".to_string(), Value::Data(vec![0x62, 0x70, 0x00, 0xFF]));

    let mut top = Dictionary::new();
    top.insert("CompatibleVersion".to_string(), Value::Integer(1u64.into()));
    top.insert("RawQuery".to_string(), Value::String("true".to_string()));
    top.insert("RawQueryDict".to_string(), Value::Dictionary(query_dict));
    top.insert(
        statics::SF_SEARCH_CRITERIA.to_string(),
        Value::Dictionary(criteria),
    );
    top.insert(
        "ModificationDate".to_string(),
        Value::Date(plist::Date::from(SystemTime::UNIX_EPOCH)),
    );
    top.insert("SidebarWidth".to_string(), Value::Real(192.5));

    Value::Dictionary(top)
}

#[test]
fn unmodified_save_preserves_every_field() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("folders.savedSearch");
    let output_path = dir.path().join("folders-out.savedSearch");

    let original = sample_saved_search(&["/Users/a/Documents", "/Users/a/Downloads"]);
    let mut bytes = Vec::new();
    original.to_writer_binary(&mut bytes)?;
    std::fs::write(&input_path, &bytes)?;

    let mut editor = SavedSearchEditor::new(Box::new(NullFinder));
    editor.load_path(&input_path)?;
    editor.commit_and_save(&output_path)?;

    let written = Value::from_file(&output_path)?;
    assert_eq!(written, original);
    Ok(())
}

#[test]
fn xml_input_still_writes_binary_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("folders.savedSearch");
    let output_path = dir.path().join("folders-out.savedSearch");

    let original = sample_saved_search(&["/Users/a/Documents"]);
    let mut bytes = Vec::new();
    original.to_writer_xml(&mut bytes)?;
    std::fs::write(&input_path, &bytes)?;

    let mut editor = SavedSearchEditor::new(Box::new(NullFinder));
    editor.load_path(&input_path)?;
    assert_eq!(
        editor.document().map(|d| d.source_format()),
        Some(PlistFormat::Xml)
    );

    editor.commit_and_save(&output_path)?;

    let out_bytes = std::fs::read(&output_path)?;
    assert!(out_bytes.starts_with(b"bplist"), "output must be binary");

    let written = Value::from_file(&output_path)?;
    assert_eq!(written, original);
    Ok(())
}

#[test]
fn reload_of_saved_output_sees_the_same_paths() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("folders.savedSearch");
    let output_path = dir.path().join("folders-out.savedSearch");

    let original = sample_saved_search(&["/Users/a/Documents", "/Users/a/Documents"]);
    let mut bytes = Vec::new();
    original.to_writer_binary(&mut bytes)?;
    std::fs::write(&input_path, &bytes)?;

    let mut editor = SavedSearchEditor::new(Box::new(NullFinder));
    editor.load_path(&input_path)?;
    editor.commit_and_save(&output_path)?;

    // Duplicates in the scope are legal and survive the round trip.
    let mut reloaded = SavedSearchEditor::new(Box::new(NullFinder));
    reloaded.load_path(&output_path)?;
    assert_eq!(reloaded.paths(), editor.paths());
    assert_eq!(reloaded.paths().len(), 2);
    Ok(())
}
