use serde::{Deserialize, Serialize};

use crate::utils::public_path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub id: i64,
    pub name: String,
}

/// Upload response: the stored row plus where to download it from.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    #[serde(flatten)]
    pub file: File,
    pub path: String,
}

impl From<File> for UploadedFile {
    fn from(file: File) -> Self {
        let path = public_path(&file.name);
        Self { file, path }
    }
}
