mod file_handler;
mod song_handler;

pub use file_handler::FileHandler;
pub use song_handler::SongHandler;
