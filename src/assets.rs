//! Animation sources.
//!
//! The core never decodes anything itself: it asks an [`AssetProvider`] for
//! the ordered frames of a logical name and only ever cycles an index over
//! them.  In the terminal a frame is the glyph string drawn for an entity.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::entities::Frames;
use crate::error::AssetError;

pub const SPACESHIP: &str = "spaceship";
pub const ALIEN: &str = "alien";
pub const PROJECTILE: &str = "projectile";
pub const BARRIER: &str = "barrier";
pub const BACKGROUND: &str = "background";

pub trait AssetProvider {
    /// Ordered frames for `name`.  A single frame means "static".
    fn frames(&self, name: &str) -> Result<Frames, AssetError>;
}

// ── Built-in glyphs ───────────────────────────────────────────────────────────

/// Sprites compiled into the binary.
pub struct GlyphAtlas {
    sheets: HashMap<&'static str, &'static [&'static str]>,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        let mut sheets: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
        sheets.insert(SPACESHIP, &["/▲\\", "/△\\"]);
        sheets.insert(ALIEN, &["«▼»", "»▼«", "«▽»", "»▽«"]);
        sheets.insert(PROJECTILE, &["║", "|"]);
        sheets.insert(BARRIER, &["▓▓▓▓▓", "▓▒▓▒▓", "▒▓▒▓▒"]);
        sheets.insert(
            BACKGROUND,
            &[
                " .      *        .     +        .    ",
                "  .      *        .     +        .   ",
                "   .      *        .     +        .  ",
                "    .      *        .     +        . ",
            ],
        );
        Self { sheets }
    }
}

impl AssetProvider for GlyphAtlas {
    fn frames(&self, name: &str) -> Result<Frames, AssetError> {
        let sheet = self
            .sheets
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_string()))?;
        Ok(sheet.iter().map(|frame| frame.to_string()).collect())
    }
}

// ── Sprite sheets on disk ─────────────────────────────────────────────────────

/// Reads `<root>/<name>.txt`, one frame per non-empty line.
pub struct DirectoryAtlas {
    root: PathBuf,
}

impl DirectoryAtlas {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetProvider for DirectoryAtlas {
    fn frames(&self, name: &str) -> Result<Frames, AssetError> {
        let path = self.root.join(format!("{name}.txt"));
        let text = fs::read_to_string(&path).map_err(|source| AssetError::Unreadable {
            name: name.to_string(),
            path: path.clone(),
            source,
        })?;
        let frames: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        if frames.is_empty() {
            return Err(AssetError::Empty(name.to_string()));
        }
        debug!(name, path = %path.display(), frames = frames.len(), "loaded sprite sheet");
        Ok(Arc::from(frames))
    }
}

// ── Frame set ─────────────────────────────────────────────────────────────────

/// Every animation the game needs, loaded once at startup.
#[derive(Clone, Debug)]
pub struct FrameSet {
    pub spaceship: Frames,
    pub alien: Frames,
    pub projectile: Frames,
    pub barrier: Frames,
    pub background: Frames,
}

impl FrameSet {
    pub fn load(provider: &dyn AssetProvider) -> Result<Self, AssetError> {
        let load = |name: &str| -> Result<Frames, AssetError> {
            let frames = provider.frames(name)?;
            if frames.is_empty() {
                return Err(AssetError::Empty(name.to_string()));
            }
            Ok(frames)
        };
        Ok(Self {
            spaceship: load(SPACESHIP)?,
            alien: load(ALIEN)?,
            projectile: load(PROJECTILE)?,
            barrier: load(BARRIER)?,
            background: load(BACKGROUND)?,
        })
    }

    /// No frames at all: every entity is drawn with its fallback shape.
    pub fn still() -> Self {
        let none: Frames = Arc::from(Vec::<String>::new());
        Self {
            spaceship: none.clone(),
            alien: none.clone(),
            projectile: none.clone(),
            barrier: none.clone(),
            background: none,
        }
    }
}
