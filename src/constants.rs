// Routes
pub const SONGS_ROUTE: &str = "/api/songs";
pub const SONG_ROUTE: &str = "/api/songs/{id}";
pub const FILES_ROUTE: &str = "/api/files";
pub const UPLOADS_PREFIX: &str = "/uploads";
pub const UPLOAD_ROUTE: &str = "/uploads/{filename}";

// Multipart
pub const FILE_FIELD: &str = "file";
pub const TEMP_UPLOAD_PREFIX: &str = ".upload-";

// Media types
pub const MIME_JSON: &str = "application/json";
pub const MIME_MULTIPART: &str = "multipart/form-data";

// Messages
pub const MESSAGE_MISSING_FILE_DATA: &str = "Could not find file data";
pub const MESSAGE_INVALID_FILE_NAME: &str = "Invalid file name";
pub const MESSAGE_INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Defaults
pub const DEF_SQLITE_DB_URL: &str = "sqlite://tuneful.db";
pub const DEF_UPLOAD_DIR: &str = "uploads";
pub const DEF_HOST: &str = "127.0.0.1";
pub const DEF_PORT: u16 = 8080;
pub const DEF_MAX_CONNECTIONS: u32 = 5;
