// rust/engine/src/engine/map.rs
#![forbid(unsafe_code)]

use rand::prelude::*;
use tracing::debug;

use crate::engine::block::{Block, BlockKind};
use crate::engine::chunks::{Cell, ChunkCatalogue, ChunkPattern};
use crate::engine::config::Config;
use crate::engine::error::{ConfigError, PlatformerError};

/// How a chunk is addressed by `Map::load_chunk`.
#[derive(Clone, Copy, Debug)]
pub enum ChunkId<'a> {
    /// Key into the Map's catalogue.
    ByKey(&'a str),
    /// Caller-supplied rows, validated against `Config::chunk_height`.
    Literal(&'a [&'a str]),
}

/// Outcome of one `Map::level_generation` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// The last chunk is still beyond the right edge of the window.
    NotYet,
    /// A new chunk was appended.
    Advanced,
    /// Sequential level is fully loaded; nothing left to append.
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct Map {
    cfg: Config,
    catalogue: ChunkCatalogue,
    level: Vec<String>,
    level_idx: usize,

    blocks: Vec<Block>,
    /// Total camera shift applied to the world since the last reset (<= 0 when scrolling right).
    scrolled: i64,

    // Random-mode chunk stream.
    rng: StdRng,
}

impl Map {
    /// Map over the standard catalogue and level.
    pub fn new(cfg: Config) -> Result<Self, PlatformerError> {
        Self::with_catalogue(
            cfg,
            ChunkCatalogue::standard(),
            crate::engine::chunks::standard_level(),
        )
    }

    /**
     * Map over a caller-supplied catalogue and level sequence.
     *
     * Fails if the catalogue height differs from `cfg.chunk_height`, the level is empty,
     * or the level names a key the catalogue lacks.
     */
    pub fn with_catalogue(
        cfg: Config,
        catalogue: ChunkCatalogue,
        level: Vec<String>,
    ) -> Result<Self, PlatformerError> {
        cfg.validate_world()?;
        if level.is_empty() {
            return Err(ConfigError::EmptyLevel.into());
        }
        if catalogue.chunk_height() != cfg.chunk_height {
            return Err(crate::engine::error::ChunkError::RowCount {
                found: catalogue.chunk_height(),
                expected: cfg.chunk_height,
            }
            .into());
        }
        if let Some(missing) = level.iter().find(|k| !catalogue.contains(k)) {
            return Err(PlatformerError::UnknownChunk(missing.clone()));
        }

        let rng = StdRng::seed_from_u64(cfg.seed);
        Ok(Self {
            cfg,
            catalogue,
            level,
            level_idx: 1,
            blocks: Vec::new(),
            scrolled: 0,
            rng,
        })
    }

    /// Clears generated geometry and rewinds the level cursor. The RNG stream continues.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.level_idx = 1;
        self.scrolled = 0;
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn catalogue(&self) -> &ChunkCatalogue {
        &self.catalogue
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }

    pub fn level(&self) -> &[String] {
        &self.level
    }

    pub fn level_idx(&self) -> usize {
        self.level_idx
    }

    /// Number of chunks in the level (progress denominator).
    pub fn chunk_count(&self) -> usize {
        self.level.len()
    }

    pub fn scrolled(&self) -> i64 {
        self.scrolled
    }

    /// Books a camera shift already applied to the blocks.
    pub fn record_scroll(&mut self, dx: i32) {
        self.scrolled += i64::from(dx);
    }

    /// Decodes a chunk at world x `x_start` and appends its blocks.
    /// Returns the number of blocks appended.
    pub fn load_chunk(&mut self, id: ChunkId<'_>, x_start: i32) -> Result<usize, PlatformerError> {
        let literal;
        let pattern: &ChunkPattern = match id {
            ChunkId::ByKey(key) => self
                .catalogue
                .get(key)
                .ok_or_else(|| PlatformerError::UnknownChunk(key.to_string()))?,
            ChunkId::Literal(rows) => {
                literal = ChunkPattern::parse(rows, self.cfg.chunk_height)?;
                &literal
            }
        };

        let appended = decode_into(&self.cfg, pattern, x_start, &mut self.blocks);
        debug!(?id, x_start, appended, "chunk loaded");
        Ok(appended)
    }

    /// Loads the first chunk of the level at the configured start x.
    pub fn load_init(&mut self) -> Result<usize, PlatformerError> {
        let key = self.level[0].clone();
        self.load_chunk(ChunkId::ByKey(&key), self.cfg.start_x)
    }

    /// True while the most recently generated block is left of the window's right edge.
    ///
    /// Panics on an empty block list: generation always starts from a loaded chunk.
    pub fn end_of_chunk(&self) -> bool {
        self.last_block().rect.x < self.cfg.size_x()
    }

    fn last_block(&self) -> &Block {
        assert!(
            !self.blocks.is_empty(),
            "level generation requires at least one loaded block"
        );
        &self.blocks[self.blocks.len() - 1]
    }

    /// Appends the next chunk once the current one has scrolled into view.
    pub fn level_generation(&mut self) -> Result<Generation, PlatformerError> {
        if !self.end_of_chunk() {
            return Ok(Generation::NotYet);
        }

        let x_start = self.last_block().rect.x + self.cfg.block_width;

        if self.cfg.random_gen {
            let keys: Vec<&str> = self.catalogue.keys().collect();
            let key = match keys.choose(&mut self.rng) {
                Some(k) => (*k).to_string(),
                None => return Ok(Generation::Exhausted),
            };
            self.load_chunk(ChunkId::ByKey(&key), x_start)?;
            return Ok(Generation::Advanced);
        }

        if self.level_idx < self.level.len() {
            let key = self.level[self.level_idx].clone();
            self.load_chunk(ChunkId::ByKey(&key), x_start)?;
            self.level_idx += 1;
            return Ok(Generation::Advanced);
        }

        Ok(Generation::Exhausted)
    }
}

/// Column-major decode: columns left to right, rows top to bottom.
fn decode_into(cfg: &Config, pattern: &ChunkPattern, x_start: i32, out: &mut Vec<Block>) -> usize {
    let before = out.len();
    let top = cfg.chunk_top();

    let mut x = x_start;
    for col in 0..pattern.width() {
        let mut y = top;
        for row in 0..pattern.height() {
            let kind = match pattern.cell(row, col) {
                Cell::Wall => Some(BlockKind::Wall),
                Cell::End => Some(BlockKind::End),
                Cell::Empty => None,
            };
            if let Some(kind) = kind {
                out.push(Block::new(x, y, cfg.block_width, cfg.block_height, kind));
            }
            y += cfg.block_height;
        }
        x += cfg.block_width;
    }

    out.len() - before
}
