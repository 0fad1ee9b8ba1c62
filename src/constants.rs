/// Characters that render with zero width (or look like a plain space) and are
/// removed before any whitespace handling.
pub const INVISIBLE_CHARS: [char; 7] = [
    ZERO_WIDTH_SPACE,
    ZERO_WIDTH_NO_BREAK_SPACE,
    WORD_JOINER,
    ZERO_WIDTH_JOINER,
    LEFT_TO_RIGHT_MARK,
    RIGHT_TO_LEFT_MARK,
    NO_BREAK_SPACE,
];

pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
pub const ZERO_WIDTH_NO_BREAK_SPACE: char = '\u{FEFF}';
pub const WORD_JOINER: char = '\u{2060}';
pub const ZERO_WIDTH_JOINER: char = '\u{200D}';
pub const LEFT_TO_RIGHT_MARK: char = '\u{200E}';
pub const RIGHT_TO_LEFT_MARK: char = '\u{200F}';
pub const NO_BREAK_SPACE: char = '\u{00A0}';

// Default routes registered by the router bootstrap
pub const ROOT_PATH: &str = "/";
pub const FAVICON_PATH: &str = "/favicon.ico";
pub const ROOT_MESSAGE: &str = "200 OK";

// Configuration defaults
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILE_NAME: &str = "service.log";
