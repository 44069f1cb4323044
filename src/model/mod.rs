mod file_model;
mod song_model;

pub use file_model::{File, UploadedFile};
pub use song_model::{Song, SongReq};
