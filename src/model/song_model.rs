use serde::{Deserialize, Serialize};
use validator::Validate;

use super::File;

/// A catalog entry; always points at exactly one file row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub file: File,
}

/// Unknown fields (`id`, a top level `name`, `file.id`) are ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct SongReq {
    #[validate(nested)]
    pub file: FileReq,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FileReq {
    #[validate(length(min = 1, message = "File name cannot be empty"))]
    pub name: String,
}
