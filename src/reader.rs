//! Reading translation dictionaries from disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::csv::CsvParser;
use crate::error::TranslateError;
use crate::translations::Dictionary;

/// Filesystem access used for dictionary files
pub trait FileDriver: Send + Sync {
    /// Whether a path exists. Absence is `Ok(false)`, never an error.
    fn is_exists(&self, path: &Path) -> Result<bool, TranslateError>;

    fn read_to_string(&self, path: &Path) -> Result<String, TranslateError>;
}

/// Local disk driver
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileDriver;

impl FileDriver for LocalFileDriver {
    fn is_exists(&self, path: &Path) -> Result<bool, TranslateError> {
        path.try_exists()
            .map_err(|e| TranslateError::file_system(path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, TranslateError> {
        fs::read_to_string(path).map_err(|e| TranslateError::file_system(path, e))
    }
}

/// Turns a dictionary file path into phrase/translation pairs
#[derive(Clone)]
pub struct FileDataReader {
    driver: Arc<dyn FileDriver>,
    parser: CsvParser,
}

impl FileDataReader {
    pub fn new(driver: Arc<dyn FileDriver>) -> Self {
        Self {
            driver,
            parser: CsvParser::new().with_delimiter(','),
        }
    }

    /// Reader over the local filesystem
    pub fn local() -> Self {
        Self::new(Arc::new(LocalFileDriver))
    }

    /// Pairs from `path`, or an empty dictionary when the file is absent
    pub fn read_file(&self, path: &Path) -> Result<Dictionary, TranslateError> {
        if !self.driver.is_exists(path)? {
            return Ok(Dictionary::new());
        }

        let content = self.driver.read_to_string(path)?;
        let pairs = self.parser.data_pairs(&content);
        tracing::debug!(path = %path.display(), pairs = pairs.len(), "Read translation file");

        Ok(pairs)
    }
}

impl std::fmt::Debug for FileDataReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDataReader")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use tempfile::TempDir;

    /// Driver whose existence check always fails
    struct BrokenDriver;

    impl FileDriver for BrokenDriver {
        fn is_exists(&self, path: &Path) -> Result<bool, TranslateError> {
            Err(TranslateError::file_system(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            ))
        }

        fn read_to_string(&self, _path: &Path) -> Result<String, TranslateError> {
            unreachable!("existence check fails first")
        }
    }

    #[test]
    fn test_read_file_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let data = FileDataReader::local()
            .read_file(&temp.path().join("en_US.csv"))
            .unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_read_file_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fr_FR.csv");
        fs::write(&path, "\"Add to Cart\",\"Ajouter au panier\"\nHome,Accueil\n").unwrap();

        let data = FileDataReader::local().read_file(&path).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data["Add to Cart"], "Ajouter au panier");
        assert_eq!(data["Home"], "Accueil");
    }

    #[test]
    fn test_read_file_propagates_driver_failure() {
        let reader = FileDataReader::new(Arc::new(BrokenDriver));
        let result = reader.read_file(Path::new("/locked/en_US.csv"));

        assert!(matches!(result, Err(TranslateError::FileSystem { .. })));
    }

    #[test]
    fn test_read_directory_fails() {
        let temp = TempDir::new().unwrap();
        let result = FileDataReader::local().read_file(temp.path());
        assert!(matches!(result, Err(TranslateError::FileSystem { .. })));
    }
}
