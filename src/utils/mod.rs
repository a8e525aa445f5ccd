pub mod logging;
pub mod paths;
pub mod terminal;

pub use logging::init_logging;
pub use paths::{expand_tilde, format_path_with_tilde, validate_file_size};
pub use terminal::strip_ansi_codes;
