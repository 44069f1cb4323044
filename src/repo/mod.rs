mod file_repo;
mod song_repo;

pub use file_repo::FileRepo;
pub use song_repo::SongRepo;
