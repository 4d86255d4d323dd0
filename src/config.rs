use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

/// Default playfield width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 32;

/// Default playfield height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 32;

/// Default target frame duration in milliseconds (~60 fps).
pub const DEFAULT_FRAME_DURATION_MS: u64 = 16;

/// Default number of points kept in each item set.
pub const DEFAULT_ITEM_COUNT: usize = 5;

/// Starting snake speed in tiles per tick.
pub const INITIAL_SPEED: f64 = 0.1;

/// Speed delta applied on food (added) and poison (subtracted).
pub const SPEED_STEP: f64 = 0.02;

/// Lower clamp for snake speed so poison can never stall or reverse movement.
pub const MIN_SPEED: f64 = 0.02;

/// Random samples tried before item placement falls back to scanning for
/// free cells. Keeps placement O(1) on sparse boards and terminating on
/// dense ones.
pub const PLACEMENT_SAMPLE_ATTEMPTS: usize = 64;

const APP_DIR_NAME: &str = "torus-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Errors surfaced while assembling a runnable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    DegenerateGrid { width: u16, height: u16 },

    #[error(
        "grid of {total_cells} cells cannot hold the snake plus {item_count} \
         food and {item_count} poison points with room to move"
    )]
    GridTooSmall {
        total_cells: usize,
        item_count: usize,
    },

    #[error("failed to read settings file {path}: {source}")]
    SettingsUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    SettingsMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

/// Logical grid dimensions passed through the game as a named type.
///
/// Construction is fallible on purpose: item placement rejection-samples
/// the grid, which cannot terminate on a zero-sized playfield.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Creates a grid, rejecting degenerate dimensions.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::DegenerateGrid { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(self) -> u16 {
        self.height
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Construction-time settings, fixed for the lifetime of a simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_width: u16,
    pub grid_height: u16,
    pub frame_duration_ms: u64,
    pub item_count: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            frame_duration_ms: DEFAULT_FRAME_DURATION_MS,
            item_count: DEFAULT_ITEM_COUNT,
        }
    }
}

impl Settings {
    /// Loads settings from `path` when given, otherwise from the platform
    /// config directory. A missing file yields the defaults; an unreadable
    /// or malformed file is an error the caller can surface before entering
    /// raw terminal mode.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(explicit) => explicit.to_path_buf(),
            None => default_settings_path(),
        };

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::SettingsUnreadable { path, source }),
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::SettingsMalformed { path, source })
    }

    /// Returns the validated grid dimensions.
    pub fn grid(&self) -> Result<GridSize, ConfigError> {
        GridSize::new(self.grid_width, self.grid_height)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn default_settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// A color theme applied to all visual elements.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub poison: Color,
    pub border_fg: Color,
    pub hud_fg: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic blue snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::White,
    snake_body: Color::Blue,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    poison: Color::Green,
    border_fg: Color::White,
    hud_fg: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    poison: Color::LightGreen,
    border_fg: Color::Cyan,
    hud_fg: Color::Cyan,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// All available themes.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN];

impl Theme {
    /// Looks a theme up by its CLI name, case-insensitively.
    pub fn by_name(name: &str) -> Result<&'static Theme, ConfigError> {
        THEMES
            .iter()
            .find(|theme| theme.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownTheme(name.to_string()))
    }
}

/// Food glyph.
pub const GLYPH_FOOD: &str = "●";

/// Poison glyph.
pub const GLYPH_POISON: &str = "✸";

/// Snake body segment glyph.
pub const GLYPH_SNAKE_BODY: &str = "█";

/// Snake tail segment glyph.
pub const GLYPH_SNAKE_TAIL: &str = "▓";

/// Snake head glyphs, one per heading.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
