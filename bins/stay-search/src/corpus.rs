//! Reading a listing corpus from disk or stdin.

use staybook_core::{Error, Result};
use staybook_search::Candidate;
use std::io::Read;
use std::path::Path;

/// Load a JSON array of listings. A path of `-` reads stdin.
pub fn load(path: &Path) -> Result<Vec<Candidate>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| Error::io("Failed to read corpus from stdin").with_source(e))?;
        buf
    } else {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        std::fs::read_to_string(path).map_err(|e| {
            Error::from(e).with_context(format!("Reading corpus {}", path.display()))
        })?
    };

    let corpus: Vec<Candidate> = serde_json::from_str(&content)
        .map_err(|e| Error::from(e).with_context(format!("Decoding corpus {}", path.display())))?;

    tracing::debug!(path = %path.display(), listings = corpus.len(), "Loaded corpus");
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use staybook_core::ErrorCode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_listing_service_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "name": "Mây Homestay", "type": 1, "province": "Lào Cai",
                "benefits": [{{"id": 1, "name": "Wifi"}}]}}]"#
        )
        .unwrap();

        let corpus = load(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus[0].id, 7);
        assert_eq!(corpus[0].benefits[0].name, "Wifi");
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/listings.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 1}}"#).unwrap();

        let err = load(file.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CorpusParseError);
        assert!(err.context.unwrap().contains("Decoding corpus"));
    }
}
