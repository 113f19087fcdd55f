//! Cave map files.
//!
//! One entry per line: a label followed by single-digit coordinates.
//!
//! ```text
//! M44     size 4x4
//! A11     agent start
//! GO44    goal (exit)
//! G23     gold
//! P31     pit
//! W13     wumpus
//! B21     breeze
//! S12     stench
//! ```
//!
//! Blank lines are ignored. Lines that cannot be read are skipped with a
//! warning; only a missing size, start or goal makes the whole map invalid.

use std::path::{Path, PathBuf};

use thiserror::Error;

use wumpus_core::{CaveView, Cell, Content, World, WorldError};

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("map has no size line (M<w><h>)")]
    MissingSize,

    #[error("invalid map: {0}")]
    World(#[from] WorldError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line too short")]
    TooShort,

    #[error("invalid coordinates")]
    BadCoordinates,

    #[error("unknown label '{0}'")]
    UnknownLabel(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub text: String,
    pub reason: LineError,
}

#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub world: World,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Size(i32, i32),
    Start(Cell),
    Goal(Cell),
    Item(Cell, Content),
}

fn digit(c: Option<char>) -> Option<i32> {
    c?.to_digit(10).map(|d| d as i32)
}

fn parse_line(line: &str) -> Result<Entry, LineError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() < 3 {
        return Err(LineError::TooShort);
    }

    if chars[0] == 'G' && chars.len() > 3 && chars[1] == 'O' {
        let (Some(x), Some(y)) = (digit(chars.get(2).copied()), digit(chars.get(3).copied()))
        else {
            return Err(LineError::BadCoordinates);
        };
        return Ok(Entry::Goal(Cell::new(x, y)));
    }

    let (Some(x), Some(y)) = (digit(chars.get(1).copied()), digit(chars.get(2).copied())) else {
        return Err(LineError::BadCoordinates);
    };
    let cell = Cell::new(x, y);
    match chars[0] {
        'M' => Ok(Entry::Size(x, y)),
        'A' => Ok(Entry::Start(cell)),
        'G' => Ok(Entry::Item(cell, Content::Gold)),
        'P' => Ok(Entry::Item(cell, Content::Pit)),
        'W' => Ok(Entry::Item(cell, Content::Wumpus)),
        'B' => Ok(Entry::Item(cell, Content::Breeze)),
        'S' => Ok(Entry::Item(cell, Content::Stench)),
        other => Err(LineError::UnknownLabel(other)),
    }
}

/// Parse map text. With `derive_percepts`, breezes and stenches are added
/// around every pit and wumpus on top of the ones the file lists.
pub fn parse_map(text: &str, derive_percepts: bool) -> Result<ParsedMap, MapError> {
    let mut size = None;
    let mut start = None;
    let mut goal = None;
    let mut items = Vec::new();
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(Entry::Size(w, h)) => size = Some((w, h)),
            Ok(Entry::Start(cell)) => start = Some(cell),
            Ok(Entry::Goal(cell)) => goal = Some(cell),
            Ok(Entry::Item(cell, content)) => items.push((cell, content)),
            Err(reason) => {
                tracing::warn!(line = idx + 1, text = line, %reason, "skipping map line");
                skipped.push(SkippedLine {
                    line: idx + 1,
                    text: line.to_string(),
                    reason,
                });
            }
        }
    }

    let (width, height) = size.ok_or(MapError::MissingSize)?;
    let mut builder = World::builder(width, height).derive_percepts(derive_percepts);
    if let Some(cell) = start {
        builder = builder.start(cell);
    }
    if let Some(cell) = goal {
        builder = builder.goal(cell);
    }
    for (cell, content) in items {
        builder.insert(cell, content);
    }

    Ok(ParsedMap {
        world: builder.build()?,
        skipped,
    })
}

pub fn load_map(path: &Path, derive_percepts: bool) -> Result<ParsedMap, MapError> {
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text, derive_percepts)
}

fn glyph(world: &World, cell: Cell) -> char {
    let contents = world.content_at(cell);
    if contents.contains(Content::Pit) {
        'P'
    } else if contents.contains(Content::Wumpus) {
        'W'
    } else if contents.contains(Content::Gold) {
        '$'
    } else if cell == world.start() {
        'A'
    } else if cell == world.goal() {
        'X'
    } else if contents.contains(Content::Breeze) && contents.contains(Content::Stench) {
        '*'
    } else if contents.contains(Content::Breeze) {
        'b'
    } else if contents.contains(Content::Stench) {
        's'
    } else {
        '.'
    }
}

/// Top row first, so the picture matches the coordinate system (y grows up).
pub fn render(world: &World) -> String {
    let bounds = world.bounds();
    let mut out = String::new();
    for y in (1..=bounds.height).rev() {
        out.push_str(&format!("{y} "));
        let row: Vec<String> = (1..=bounds.width)
            .map(|x| glyph(world, Cell::new(x, y)).to_string())
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out.push_str("  ");
    let axis: Vec<String> = (1..=bounds.width).map(|x| x.to_string()).collect();
    out.push_str(&axis.join(" "));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "M44\nA11\nGO44\nG23\nP31\nW13\n";

    #[test]
    fn parses_every_label() {
        let parsed = parse_map("M33\nA11\nGO33\nG22\nP31\nW13\nB21\nS12\n", false)
            .expect("valid map");
        let world = &parsed.world;

        assert_eq!(world.bounds().width, 3);
        assert_eq!(world.start(), Cell::new(1, 1));
        assert_eq!(world.goal(), Cell::new(3, 3));
        assert!(world.content_at(Cell::new(2, 2)).contains(Content::Gold));
        assert!(world.content_at(Cell::new(3, 1)).contains(Content::Pit));
        assert!(world.content_at(Cell::new(1, 3)).contains(Content::Wumpus));
        assert!(world.content_at(Cell::new(2, 1)).contains(Content::Breeze));
        assert!(world.content_at(Cell::new(1, 2)).contains(Content::Stench));
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn derives_percepts_around_hazards() {
        let parsed = parse_map(SAMPLE, true).expect("valid map");
        let world = &parsed.world;

        assert!(world.content_at(Cell::new(2, 1)).contains(Content::Breeze));
        assert!(world.content_at(Cell::new(3, 2)).contains(Content::Breeze));
        assert!(world.content_at(Cell::new(1, 2)).contains(Content::Stench));
        assert!(!world.content_at(Cell::new(1, 1)).contains(Content::Breeze));
    }

    #[test]
    fn bad_lines_are_skipped_not_fatal() {
        let parsed = parse_map("M22\nA11\nGO22\nXY\nPab\nQ12\n\n", false).expect("valid map");

        let reasons: Vec<(usize, LineError)> = parsed
            .skipped
            .iter()
            .map(|s| (s.line, s.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (4, LineError::TooShort),
                (5, LineError::BadCoordinates),
                (6, LineError::UnknownLabel('Q')),
            ]
        );
    }

    #[test]
    fn missing_size_start_or_goal_is_an_error() {
        assert!(matches!(parse_map("A11\nGO22\n", false), Err(MapError::MissingSize)));
        assert!(matches!(
            parse_map("M22\nGO22\n", false),
            Err(MapError::World(WorldError::MissingStart))
        ));
        assert!(matches!(
            parse_map("M22\nA11\n", false),
            Err(MapError::World(WorldError::MissingGoal))
        ));
        assert!(matches!(
            parse_map("M22\nA11\nGO22\nP35\n", false),
            Err(MapError::World(WorldError::ContentOutOfBounds { .. }))
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cave.txt");
        std::fs::write(&path, SAMPLE).expect("write map");

        let parsed = load_map(&path, true).expect("load map");
        assert_eq!(parsed.world.goal(), Cell::new(4, 4));

        let missing = load_map(&dir.path().join("nope.txt"), true);
        assert!(matches!(missing, Err(MapError::Io { .. })));
    }

    #[test]
    fn shipped_maps_parse_cleanly() {
        for text in [
            include_str!("../maps/classic.txt"),
            include_str!("../maps/guarded.txt"),
            include_str!("../maps/coin_flip.txt"),
        ] {
            let parsed = parse_map(text, true).expect("valid map");
            assert!(parsed.skipped.is_empty());
        }
    }

    #[test]
    fn render_draws_top_row_first() {
        let parsed = parse_map("M22\nA11\nGO22\nP21\n", false).expect("valid map");
        assert_eq!(render(&parsed.world), "2 . X\n1 A P\n  1 2\n");
    }
}
