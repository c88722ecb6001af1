// rust/engine/src/engine/chunks.rs
#![forbid(unsafe_code)]

/*
Chunk patterns
--------------
A chunk is a fixed-height ASCII slice of level geometry:
- 'W' -> wall block
- 'E' -> end-of-chunk marker block (solid, counted for progress)
- anything else -> empty

Every row of a chunk has the same length and every chunk used by one Map has exactly
`Config::chunk_height` rows. Shapes are checked once, when a pattern enters a catalogue
or is handed to `Map::load_chunk` literally, so decoding never sees a ragged pattern.

The default catalogue below is 16 rows tall and 15 columns wide per chunk. Each chunk
ends with an 'E' floor tile in its last column, which is also the last block appended
when the chunk is decoded.
*/

use std::collections::BTreeMap;

use crate::engine::error::ChunkError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    End,
}

impl Cell {
    #[inline]
    pub fn from_char(c: char) -> Self {
        match c {
            'W' => Cell::Wall,
            'E' => Cell::End,
            _ => Cell::Empty,
        }
    }
}

/// Validated chunk pattern, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkPattern {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl ChunkPattern {
    /// Parses and validates `rows` against the expected row count.
    pub fn parse<S: AsRef<str>>(rows: &[S], chunk_height: usize) -> Result<Self, ChunkError> {
        if rows.len() != chunk_height {
            return Err(ChunkError::RowCount {
                found: rows.len(),
                expected: chunk_height,
            });
        }

        let decoded: Vec<Vec<Cell>> = rows
            .iter()
            .map(|r| r.as_ref().chars().map(Cell::from_char).collect())
            .collect();

        let width = decoded.first().map_or(0, Vec::len);
        for (row, cells) in decoded.iter().enumerate().skip(1) {
            if cells.len() != width {
                return Err(ChunkError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            rows: decoded,
            width,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    /// Number of cells that decode into blocks.
    pub fn solid_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&c| c != Cell::Empty)
            .count()
    }
}

/// Immutable lookup table of named chunk patterns.
///
/// Keys are kept sorted so random selection is reproducible for a given seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkCatalogue {
    chunk_height: usize,
    chunks: BTreeMap<String, ChunkPattern>,
}

impl ChunkCatalogue {
    pub fn new(chunk_height: usize) -> Self {
        Self {
            chunk_height,
            chunks: BTreeMap::new(),
        }
    }

    /// Builder-style insert; rejects patterns with the wrong shape.
    pub fn with_chunk<S: AsRef<str>>(
        mut self,
        key: impl Into<String>,
        rows: &[S],
    ) -> Result<Self, ChunkError> {
        self.insert(key, rows)?;
        Ok(self)
    }

    pub fn insert<S: AsRef<str>>(
        &mut self,
        key: impl Into<String>,
        rows: &[S],
    ) -> Result<(), ChunkError> {
        let pattern = ChunkPattern::parse(rows, self.chunk_height)?;
        self.chunks.insert(key.into(), pattern);
        Ok(())
    }

    #[inline]
    pub fn chunk_height(&self) -> usize {
        self.chunk_height
    }

    pub fn get(&self, key: &str) -> Option<&ChunkPattern> {
        self.chunks.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.chunks.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chunks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The built-in 16-row catalogue.
    pub fn standard() -> Self {
        let mut cat = Self::new(STANDARD_CHUNK_HEIGHT);
        for (key, rows) in STANDARD_CHUNKS {
            // Shapes are fixed at compile time and covered by tests.
            if let Err(e) = cat.insert(*key, rows) {
                panic!("built-in chunk {key:?} is malformed: {e}");
            }
        }
        cat
    }
}

/// Default chunk sequence played in sequential mode. The first key is the chunk
/// preloaded on reset.
pub fn standard_level() -> Vec<String> {
    STANDARD_LEVEL.iter().map(|k| (*k).to_string()).collect()
}

pub const STANDARD_CHUNK_HEIGHT: usize = 16;

pub const STANDARD_LEVEL: &[&str] = &[
    "init", "chunk_1", "chunk_2", "chunk_3", "chunk_4", "chunk_5", "chunk_6", "chunk_7",
    "chunk_8", "chunk_9", "chunk_10", "chunk_11", "chunk_12", "chunk_13", "chunk_14",
];

const SKY: &str = "               ";
const FLOOR: &str = "WWWWWWWWWWWWWWE";

const STANDARD_CHUNKS: &[(&str, [&str; STANDARD_CHUNK_HEIGHT])] = &[
    (
        "init",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, FLOOR,
        ],
    ),
    (
        "chunk_1",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "      WWW      ",
            FLOOR,
        ],
    ),
    (
        "chunk_2",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "WWWWW   WWWWWWE",
        ],
    ),
    (
        "chunk_3",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "         WWW   ",
            "      WWWWWW   ",
            FLOOR,
        ],
    ),
    (
        "chunk_4",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "     WWWW      ",
            SKY,
            SKY,
            "WWWW     WWWWWE",
        ],
    ),
    (
        "chunk_5",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "   W     W     ",
            "   W     W     ",
            FLOOR,
        ],
    ),
    (
        "chunk_6",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "WWW  WWWW  WWWE",
        ],
    ),
    (
        "chunk_7",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "   WWWWWWWWW   ",
            SKY,
            SKY,
            SKY,
            FLOOR,
        ],
    ),
    (
        "chunk_8",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "    WWWWWWW    ",
            FLOOR,
        ],
    ),
    (
        "chunk_9",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "WWWW  WWW  WWWE",
        ],
    ),
    (
        "chunk_10",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "       W       ",
            "       W       ",
            FLOOR,
        ],
    ),
    (
        "chunk_11",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "          WWW  ",
            SKY,
            "     WWW       ",
            SKY,
            FLOOR,
        ],
    ),
    (
        "chunk_12",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "  WW       WW  ",
            "WWWW       WWWE",
        ],
    ),
    (
        "chunk_13",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "  W   W   W    ",
            FLOOR,
        ],
    ),
    (
        "chunk_14",
        [
            SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY, SKY,
            "   WW  WW  WW  ",
            SKY,
            SKY,
            FLOOR,
        ],
    ),
];
