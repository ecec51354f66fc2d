//! Asset store backed by a manifest file.
//!
//! The manifest (`assets.txt` in the asset directory) lists one asset per line:
//!
//! ```text
//! # kind  name        file
//! img     background  background.txt
//! snd     line        line.cue
//! mus     music       theme.cue
//! fnt     main        mono.cue
//! ```
//!
//! Files are resolved under `img/`, `snd/`, `mus/` and `fnt/` respectively.
//! Images are text art (see [`crate::texture`]); for sounds, music and fonts
//! only the file's existence is checked. A bad entry is logged and skipped.
//! The built-in `tiles` and `frame` textures are always present.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::texture::{Texel, Texture, TextureRegistry, ART_PALETTE, BLOCK};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, PALETTE_SIZE};

pub const MANIFEST_FILE: &str = "assets.txt";

/// Built-in atlas: one frame per palette id, frame 0 unused.
pub const TILES_TEXTURE: &str = "tiles";

/// Built-in border drawn around the board.
pub const FRAME_TEXTURE: &str = "frame";

/// Width of one board cell in texels.
pub const TILE_WIDTH: u16 = 2;

/// Height of one board cell in texels.
pub const TILE_HEIGHT: u16 = 1;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("manifest line {line}: expected `<kind> <name> <file>`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("manifest line {line}: unknown asset kind {kind:?}")]
    UnknownKind { line: usize, kind: String },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("texture {name:?} is empty")]
    EmptyTexture { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Sound,
    Music,
    Font,
}

impl AssetKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "img" => Some(AssetKind::Image),
            "snd" => Some(AssetKind::Sound),
            "mus" => Some(AssetKind::Music),
            "fnt" => Some(AssetKind::Font),
            _ => None,
        }
    }

    /// Subdirectory holding files of this kind.
    pub fn dir(self) -> &'static str {
        match self {
            AssetKind::Image => "img",
            AssetKind::Sound => "snd",
            AssetKind::Music => "mus",
            AssetKind::Font => "fnt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub kind: AssetKind,
    pub name: String,
    pub file: String,
}

/// Parse one manifest line (1-based `line` for error messages).
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_manifest_line(line: usize, text: &str) -> Result<Option<ManifestEntry>, AssetError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut parts = trimmed.split_whitespace();
    let (Some(kind), Some(name), Some(file), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AssetError::Malformed {
            line,
            text: text.to_string(),
        });
    };

    let kind = AssetKind::parse(kind).ok_or_else(|| AssetError::UnknownKind {
        line,
        kind: kind.to_string(),
    })?;

    Ok(Some(ManifestEntry {
        kind,
        name: name.to_string(),
        file: file.to_string(),
    }))
}

#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    textures: HashMap<String, Texture>,
    sounds: HashMap<String, PathBuf>,
    music: HashMap<String, PathBuf>,
    fonts: HashMap<String, PathBuf>,
}

impl AssetStore {
    /// Store holding only the built-in textures.
    pub fn new() -> Self {
        let mut store = Self::default();
        store.insert_texture(TILES_TEXTURE, tiles_texture());
        store.insert_texture(FRAME_TEXTURE, frame_texture());
        store
    }

    /// Load everything listed in `dir/assets.txt`. Never fails: problems are
    /// logged and the affected entries are left out.
    pub fn load(dir: &Path) -> Self {
        let mut store = Self::new();
        let manifest = dir.join(MANIFEST_FILE);
        let text = match fs::read_to_string(&manifest) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %manifest.display(), error = %e, "asset_manifest_unreadable");
                return store;
            }
        };

        let mut loaded = 0usize;
        for (i, line) in text.lines().enumerate() {
            let result = parse_manifest_line(i + 1, line)
                .and_then(|entry| entry.map(|e| store.load_entry(dir, &e)).transpose());
            match result {
                Ok(Some(())) => loaded += 1,
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "asset_skipped"),
            }
        }

        tracing::info!(
            dir = %dir.display(),
            loaded,
            textures = store.textures.len(),
            sounds = store.sounds.len(),
            music = store.music.len(),
            fonts = store.fonts.len(),
            "assets_loaded"
        );
        store
    }

    /// Load one manifest entry relative to the asset directory.
    pub fn load_entry(&mut self, dir: &Path, entry: &ManifestEntry) -> Result<(), AssetError> {
        let path = dir.join(entry.kind.dir()).join(&entry.file);
        match entry.kind {
            AssetKind::Image => {
                let text = fs::read_to_string(&path).map_err(|source| AssetError::Read {
                    path: path.clone(),
                    source,
                })?;
                let texture = Texture::from_art(&text);
                if texture.is_empty() {
                    return Err(AssetError::EmptyTexture {
                        name: entry.name.clone(),
                    });
                }
                self.insert_texture(&entry.name, texture);
            }
            kind => {
                fs::metadata(&path).map_err(|source| AssetError::Read {
                    path: path.clone(),
                    source,
                })?;
                let table = match kind {
                    AssetKind::Sound => &mut self.sounds,
                    AssetKind::Music => &mut self.music,
                    _ => &mut self.fonts,
                };
                table.insert(entry.name.clone(), path);
            }
        }
        Ok(())
    }

    pub fn insert_texture(&mut self, name: &str, texture: Texture) {
        self.textures.insert(name.to_string(), texture);
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn sound_path(&self, name: &str) -> Option<&Path> {
        self.sounds.get(name).map(PathBuf::as_path)
    }

    pub fn music_path(&self, name: &str) -> Option<&Path> {
        self.music.get(name).map(PathBuf::as_path)
    }

    pub fn font_path(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    pub fn sound_names(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }

    pub fn music_names(&self) -> impl Iterator<Item = &str> {
        self.music.keys().map(String::as_str)
    }
}

impl TextureRegistry for AssetStore {
    fn texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }
}

/// `TILE_WIDTH`-wide solid frames for palette ids 0..=PALETTE_SIZE, left to right.
fn tiles_texture() -> Texture {
    let frames = PALETTE_SIZE as u16 + 1;
    let mut tex = Texture::new(frames * TILE_WIDTH, TILE_HEIGHT);
    for frame in 0..frames {
        let texel = Texel::new(BLOCK, ART_PALETTE[frame as usize]);
        for dx in 0..TILE_WIDTH {
            for y in 0..TILE_HEIGHT {
                tex.set(frame * TILE_WIDTH + dx, y, Some(texel));
            }
        }
    }
    tex
}

/// Box border one texel outside the board area; the inside is transparent.
fn frame_texture() -> Texture {
    let w = BOARD_WIDTH as u16 * TILE_WIDTH + 2;
    let h = BOARD_HEIGHT as u16 * TILE_HEIGHT + 2;
    let ink = ART_PALETTE[8];
    let mut tex = Texture::new(w, h);
    for x in 1..w - 1 {
        tex.set(x, 0, Some(Texel::new('─', ink)));
        tex.set(x, h - 1, Some(Texel::new('─', ink)));
    }
    for y in 1..h - 1 {
        tex.set(0, y, Some(Texel::new('│', ink)));
        tex.set(w - 1, y, Some(Texel::new('│', ink)));
    }
    tex.set(0, 0, Some(Texel::new('┌', ink)));
    tex.set(w - 1, 0, Some(Texel::new('┐', ink)));
    tex.set(0, h - 1, Some(Texel::new('└', ink)));
    tex.set(w - 1, h - 1, Some(Texel::new('┘', ink)));
    tex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_line_parsing() {
        assert_eq!(parse_manifest_line(1, "").unwrap(), None);
        assert_eq!(parse_manifest_line(1, "  # comment").unwrap(), None);
        assert_eq!(
            parse_manifest_line(1, "img splash splash.txt").unwrap(),
            Some(ManifestEntry {
                kind: AssetKind::Image,
                name: "splash".into(),
                file: "splash.txt".into(),
            })
        );
        assert!(matches!(
            parse_manifest_line(3, "img splash"),
            Err(AssetError::Malformed { line: 3, .. })
        ));
        assert!(matches!(
            parse_manifest_line(4, "vid intro intro.mp4"),
            Err(AssetError::UnknownKind { line: 4, .. })
        ));
    }

    #[test]
    fn builtins_exist_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::load(dir.path());
        let tiles = store.texture(TILES_TEXTURE).unwrap();
        assert_eq!(tiles.width(), (PALETTE_SIZE as u16 + 1) * TILE_WIDTH);
        assert_eq!(tiles.get(2, 0).map(|t| t.fg), Some(ART_PALETTE[1]));
        let frame = store.texture(FRAME_TEXTURE).unwrap();
        assert_eq!(frame.get(1, 1), None);
        assert!(frame.get(0, 1).is_some());
    }

    #[test]
    fn load_skips_bad_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("img")).unwrap();
        fs::create_dir_all(root.join("snd")).unwrap();
        fs::write(root.join("img/bg.txt"), "1212\n2121\n").unwrap();
        fs::write(root.join("img/blank.txt"), "").unwrap();
        fs::write(root.join("snd/line.cue"), "bell\n").unwrap();
        fs::write(
            root.join(MANIFEST_FILE),
            "img background bg.txt\n\
             img blank blank.txt\n\
             img ghost missing.txt\n\
             snd line line.cue\n\
             snd boom boom.cue\n\
             bogus line\n",
        )
        .unwrap();

        let store = AssetStore::load(root);

        assert_eq!(store.texture("background").map(Texture::width), Some(4));
        assert!(!store.has_texture("blank"));
        assert!(!store.has_texture("ghost"));
        assert!(store.sound_path("line").is_some());
        assert!(store.sound_path("boom").is_none());
        assert!(store.has_texture(TILES_TEXTURE));
    }
}
