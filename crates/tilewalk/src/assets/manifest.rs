//! Plain-text map files.
//!
//! The map manifest lists one `<id> <path>` pair per line. A map
//! definition starts with a `<spawn_x> <spawn_y>` line followed by one
//! placement record per line:
//!
//! ```text
//! <x> <y> <image.png> <collision> <layer>
//! <x> <y> <object.txt>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::IVec2;

use crate::error::LoadError;

/// Largest map edge in cells. Spawn and record coordinates must lie in
/// `0..MAX_MAP_EXTENT` on both axes.
pub const MAX_MAP_EXTENT: i32 = 1024;

fn within_extent(position: IVec2) -> bool {
    position.cmpge(IVec2::ZERO).all() && position.cmplt(IVec2::splat(MAX_MAP_EXTENT)).all()
}

/// Map id → map definition file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapManifest {
    maps: BTreeMap<u32, PathBuf>,
}

impl MapManifest {
    /// Parse manifest text. A repeated id replaces the earlier entry.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut maps = BTreeMap::new();
        for (index, line) in text.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let fail = |reason: &str| LoadError::Manifest {
                line: index + 1,
                reason: reason.to_string(),
            };
            match tokens.as_slice() {
                [] => continue,
                [id, path] => {
                    let id = id
                        .parse::<u32>()
                        .map_err(|_| fail("map id must be a non-negative integer"))?;
                    maps.insert(id, PathBuf::from(path));
                }
                _ => return Err(fail("expected `<id> <path>`")),
            }
        }
        Ok(Self { maps })
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
        Self::parse(&text)
    }

    /// Map definition path for an id.
    pub fn resolve(&self, id: u32) -> Result<&Path, LoadError> {
        self.maps
            .get(&id)
            .map(PathBuf::as_path)
            .ok_or(LoadError::UnknownMap { id })
    }

    pub fn insert(&mut self, id: u32, path: impl Into<PathBuf>) {
        self.maps.insert(id, path.into());
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.maps.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

/// Image tile placed on one grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRecord {
    pub position: IVec2,
    pub path: String,
    pub collision: i32,
    pub layer: i32,
}

/// Non-tile object placement. Parsed and kept, not yet spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPlacement {
    pub position: IVec2,
    pub path: String,
}

/// Parsed contents of one map definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDefinition {
    pub spawn: IVec2,
    pub tiles: Vec<TileRecord>,
    pub objects: Vec<ObjectPlacement>,
}

impl MapDefinition {
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (spawn_line, spawn_text) = lines.next().ok_or(LoadError::MissingSpawn)?;
        let spawn = match spawn_text.split_whitespace().collect::<Vec<_>>().as_slice() {
            [x, y] => IVec2::new(
                parse_field(x, spawn_line, "spawn x")?,
                parse_field(y, spawn_line, "spawn y")?,
            ),
            _ => {
                return Err(LoadError::record(
                    spawn_line,
                    "expected `<spawn_x> <spawn_y>`",
                ))
            }
        };

        if !within_extent(spawn) {
            return Err(LoadError::record(
                spawn_line,
                format!("spawn must lie within 0..{}", MAX_MAP_EXTENT),
            ));
        }

        let mut definition = MapDefinition {
            spawn,
            ..Default::default()
        };

        for (line, text) in lines {
            let tokens: Vec<&str> = text.split_whitespace().collect();
            if tokens.len() < 3 {
                return Err(LoadError::record(line, "expected `<x> <y> <path> ...`"));
            }
            let position = IVec2::new(
                parse_field(tokens[0], line, "x")?,
                parse_field(tokens[1], line, "y")?,
            );
            if !within_extent(position) {
                return Err(LoadError::record(
                    line,
                    format!("coordinates must lie within 0..{}", MAX_MAP_EXTENT),
                ));
            }
            let path = tokens[2];
            let extension = Path::new(path).extension().and_then(|ext| ext.to_str());

            match (extension, &tokens[3..]) {
                (Some("png"), [collision, layer]) => definition.tiles.push(TileRecord {
                    position,
                    path: path.to_string(),
                    collision: parse_field(collision, line, "collision")?,
                    layer: parse_field(layer, line, "layer")?,
                }),
                (Some("png"), _) => {
                    return Err(LoadError::record(
                        line,
                        "image records need `<collision> <layer>`",
                    ))
                }
                (Some("txt"), []) => definition.objects.push(ObjectPlacement {
                    position,
                    path: path.to_string(),
                }),
                (Some("txt"), _) => {
                    return Err(LoadError::record(line, "object records take no extra fields"))
                }
                _ => log::warn!("map line {}: skipping unrecognised asset {}", line, path),
            }
        }

        Ok(definition)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::io(path, source))?;
        Self::parse(&text)
    }
}

fn parse_field<T: FromStr>(token: &str, line: usize, what: &str) -> Result<T, LoadError> {
    token
        .parse()
        .map_err(|_| LoadError::record(line, format!("invalid {}: `{}`", what, token)))
}
