//! JSON import/export module for vocabulary lists.
//! Provides functionality to save and load Vocabulary structures to/from JSON files.

use crate::error::ExportError;
use crate::models::Vocabulary;
use std::fs;
use std::path::Path;

/// Exports a vocabulary to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(vocabulary: &Vocabulary, path: &Path) -> Result<(), ExportError> {
    let json_string = serde_json::to_string_pretty(vocabulary)?;
    fs::write(path, json_string)?;
    log::info!(
        "Vocabulary '{}' exported to '{}'",
        vocabulary.name,
        path.display()
    );
    Ok(())
}

/// Imports a vocabulary from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Vocabulary, ExportError> {
    let contents = fs::read_to_string(path)?;

    // Deserialize JSON string into Vocabulary structure
    let vocabulary: Vocabulary = serde_json::from_str(&contents)?;

    log::info!(
        "Vocabulary '{}' imported from '{}'",
        vocabulary.name,
        path.display()
    );
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VocabularyEntry;
    use tempfile::TempDir;

    fn create_test_vocabulary() -> Vocabulary {
        Vocabulary {
            name: "Test Vocabulary".to_string(),
            words: vec![
                VocabularyEntry {
                    term: "cześć".to_string(),
                    translation: "hello".to_string(),
                    definition: None,
                    context: Some("Cześć, Marek!".to_string()),
                },
                VocabularyEntry {
                    term: "do widzenia".to_string(),
                    translation: "goodbye".to_string(),
                    definition: Some("formal farewell".to_string()),
                    context: None,
                },
            ],
        }
    }

    #[test]
    fn test_export_json_to_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");

        export_json_to_path(&create_test_vocabulary(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"name\": \"Test Vocabulary\""));
        // Absent optional fields are left out
        assert_eq!(written.matches("\"definition\"").count(), 1);
    }

    #[test]
    fn test_import_json() {
        let json_content = r#"{
  "name": "Import Test",
  "words": [
    {
      "term": "test term",
      "translation": "test translation"
    }
  ]
}"#;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("import.json");
        fs::write(&path, json_content).unwrap();

        let vocabulary = import_json(&path).unwrap();
        assert_eq!(vocabulary.name, "Import Test");
        assert_eq!(vocabulary.words.len(), 1);
        assert_eq!(vocabulary.words[0].term, "test term");
        assert_eq!(vocabulary.words[0].translation, "test translation");
        assert_eq!(vocabulary.words[0].definition, None);
    }

    #[test]
    fn test_export_and_import_keep_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roundtrip.json");
        let original = create_test_vocabulary();

        export_json_to_path(&original, &path).unwrap();
        assert_eq!(import_json(&path).unwrap(), original);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = TempDir::new().unwrap();
        let result = import_json(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ExportError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(ExportError::Json(_))));
    }
}
