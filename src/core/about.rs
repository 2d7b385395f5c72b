/*
 * Provides the content shown by the About dialog: fixed application
 * metadata plus a block of descriptive text read verbatim from an external
 * resource file at dialog-open time.
 *
 * It uses a trait-based approach (`AboutReaderOperations`) so the presenter
 * can be tested with a mock source. The concrete implementation
 * (`FileAboutReader`) reads the text from a fixed relative path; a missing
 * or unreadable file is a hard error; the dialog is never shown with
 * substitute text.
 */
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "TextForge";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = "TextForge contributors";
pub const APP_CREATED: &str = "2025-06";

/// Default location of the about body text, relative to the working directory.
pub const ABOUT_TEXT_PATH: &str = "data/about.txt";

/// Fixed location of the window icon image.
pub const APP_ICON_PATH: &str = "assets/text_forge.ico";

#[derive(Debug)]
pub enum AboutError {
    Io(io::Error),
}

impl From<io::Error> for AboutError {
    fn from(err: io::Error) -> Self {
        AboutError::Io(err)
    }
}

impl std::fmt::Display for AboutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AboutError::Io(e) => write!(f, "About text I/O error: {e}"),
        }
    }
}

impl std::error::Error for AboutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AboutError::Io(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AboutError>;

/// Everything the About dialog displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutContent {
    pub app_name: String,
    pub version: String,
    pub author: String,
    pub created: String,
    pub body: String,
}

pub trait AboutReaderOperations: Send + Sync {
    fn load(&self) -> Result<AboutContent>;
}

pub struct FileAboutReader {
    text_path: PathBuf,
}

impl FileAboutReader {
    pub fn new() -> Self {
        Self::with_path(ABOUT_TEXT_PATH)
    }

    pub fn with_path(text_path: impl AsRef<Path>) -> Self {
        FileAboutReader {
            text_path: text_path.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileAboutReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AboutReaderOperations for FileAboutReader {
    /*
     * Assembles the About content, reading the body text from disk. The
     * read happens on every call so the dialog always reflects the file's
     * current contents.
     */
    fn load(&self) -> Result<AboutContent> {
        log::trace!("FileAboutReader: Loading about text from {:?}", self.text_path);
        let body = fs::read_to_string(&self.text_path)?;
        Ok(AboutContent {
            app_name: APP_NAME.to_string(),
            version: APP_VERSION.to_string(),
            author: APP_AUTHOR.to_string(),
            created: APP_CREATED.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_reads_body_verbatim() {
        // Arrange
        let dir = tempdir().unwrap();
        let text_path = dir.path().join("about.txt");
        let body = "A small text playground.\nLine two.";
        File::create(&text_path)
            .unwrap()
            .write_all(body.as_bytes())
            .unwrap();
        let reader = FileAboutReader::with_path(&text_path);

        // Act
        let content = reader.load().expect("about text should load");

        // Assert
        assert_eq!(content.body, body);
        assert_eq!(content.app_name, APP_NAME);
        assert_eq!(content.version, APP_VERSION);
        assert_eq!(content.author, APP_AUTHOR);
        assert_eq!(content.created, APP_CREATED);
    }

    #[test]
    fn test_load_fails_when_resource_is_missing() {
        // Arrange
        let dir = tempdir().unwrap();
        let reader = FileAboutReader::with_path(dir.path().join("missing.txt"));

        // Act
        let result = reader.load();

        // Assert
        match result {
            Err(AboutError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            Ok(_) => panic!("Expected an I/O error for a missing about text file."),
        }
    }
}
