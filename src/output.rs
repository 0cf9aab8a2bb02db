//! Writing generated documents as `.tf` files.
//!
//! Each document is written to `<dir>/<key>.tf`. Files are written one at a
//! time in [`Documents::iter`] order; a failure stops the run and leaves the
//! files already written in place.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::WriteError;
use crate::generator::Documents;

/// File extension of generated documents.
pub const EXTENSION: &str = "tf";

/// File name for a document key.
///
/// Keys come from [`Documents`] and are already unique file stems.
pub fn file_name(key: &str) -> String {
    format!("{key}.{EXTENSION}")
}

/// Write every document into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns `WriteError::Io` for the first directory or file that cannot be written.
pub fn write_documents(dir: &Path, documents: &Documents) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(dir).map_err(|source| WriteError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(documents.len());
    for (key, body) in documents.iter() {
        let path = dir.join(file_name(key));
        fs::write(&path, body.to_string()).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote document");
        written.push(path);
    }
    Ok(written)
}

/// Render every document into one listing, each preceded by its file name.
pub fn render_documents(documents: &Documents) -> String {
    let mut out = String::new();
    for (key, body) in documents.iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("# {}\n", file_name(key)));
        out.push_str(&body.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hcl::Body;

    fn documents() -> Documents {
        let mut docs = Documents::default();
        docs.folders
            .append_new_block("data", ["grafana_folder", "team-a"])
            .body
            .set_attribute("title", "team-a");
        let mut folder = Body::new();
        folder
            .append_new_block("resource", ["grafana_rule_group", "alerts"])
            .body
            .set_attribute("name", "alerts");
        docs.by_folder.insert("team-a".to_string(), folder);
        docs
    }

    #[test]
    fn file_name_appends_extension() {
        assert_eq!(file_name("folders"), "folders.tf");
        assert_eq!(file_name("team-a"), "team-a.tf");
        assert_eq!(file_name("Team A"), "Team A.tf");
    }


    #[test]
    fn writes_one_file_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_documents(dir.path(), &documents()).unwrap();

        assert_eq!(
            written,
            [dir.path().join("folders.tf"), dir.path().join("team-a.tf")]
        );
        let folders = fs::read_to_string(dir.path().join("folders.tf")).unwrap();
        assert_eq!(
            folders,
            "data \"grafana_folder\" \"team-a\" {\n  title = \"team-a\"\n}\n"
        );
        let team = fs::read_to_string(dir.path().join("team-a.tf")).unwrap();
        assert!(team.contains("resource \"grafana_rule_group\" \"alerts\""));
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("terraform").join("alerting");

        write_documents(&nested, &documents()).unwrap();
        assert!(nested.join("folders.tf").is_file());
    }

    #[test]
    fn empty_documents_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_documents(dir.path(), &Documents::default()).unwrap();
        assert!(written.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = write_documents(&blocker, &documents()).unwrap_err();
        let WriteError::Io { path, .. } = err;
        assert_eq!(path, blocker);
    }

    #[test]
    fn render_lists_documents_with_headers() {
        let rendered = render_documents(&documents());
        assert!(rendered.starts_with("# folders.tf\ndata \"grafana_folder\""));
        assert!(rendered.contains("\n\n# team-a.tf\nresource \"grafana_rule_group\""));
    }
}
