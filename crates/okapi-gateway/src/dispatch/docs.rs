//! Per-method documentation files (`<docs_dir>/<method name>/docs.xml`).

use std::path::{Path, PathBuf};

use okapi_core::error::{OkapiError, Result};

use super::registry::is_catalogued;

pub struct DocsStore {
    root: PathBuf,
}

impl DocsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Raw `docs.xml` bytes for a catalogue method.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        if !is_catalogued(name) {
            return Err(OkapiError::UnknownMethod(name.to_string()));
        }
        let path = docs_path(&self.root, name);
        tokio::fs::read(&path).await.map_err(|e| {
            tracing::debug!(method = %name, path = %path.display(), error = %e, "docs read failed");
            OkapiError::MissingDocumentation(format!("{name}/docs.xml"))
        })
    }
}

fn docs_path(root: &Path, name: &str) -> PathBuf {
    name.split('/')
        .fold(root.to_path_buf(), |p, seg| p.join(seg))
        .join("docs.xml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docs_path_is_nested() {
        let p = docs_path(Path::new("/d"), "services/logs/entry");
        assert_eq!(p, PathBuf::from("/d/services/logs/entry/docs.xml"));
    }

    #[tokio::test]
    async fn uncatalogued_name_is_unknown() {
        let store = DocsStore::new("/nonexistent");
        let err = store.read("services/nope").await.err();
        assert!(matches!(err, Some(OkapiError::UnknownMethod(_))));
    }

    #[tokio::test]
    async fn absent_file_is_missing_documentation() {
        let store = DocsStore::new("/nonexistent");
        let err = store.read("services/logs/entry").await.err();
        assert!(matches!(err, Some(OkapiError::MissingDocumentation(_))));
    }
}
