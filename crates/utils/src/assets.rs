use std::path::PathBuf;

use directories::ProjectDirs;

/// Directory holding the local database. Debug builds keep it inside the
/// workspace so development data never mixes with an installed copy.
pub fn asset_dir() -> PathBuf {
    let path = if cfg!(debug_assertions) {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../dev_assets")
    } else {
        ProjectDirs::from("dev", "daybook", "daybook")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".daybook"))
    };

    if !path.exists() {
        if let Err(e) = std::fs::create_dir_all(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to create asset directory");
        }
    }

    path
}

pub fn database_path() -> PathBuf {
    asset_dir().join("daybook.sqlite")
}
