// rust/engine/src/engine/block.rs
#![forbid(unsafe_code)]

/// Axis-aligned integer rectangle (pixel units, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn set_left(&mut self, v: i32) {
        self.x = v;
    }

    #[inline]
    pub fn set_right(&mut self, v: i32) {
        self.x = v - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, v: i32) {
        self.y = v;
    }

    #[inline]
    pub fn set_bottom(&mut self, v: i32) {
        self.y = v - self.h;
    }

    /// Strict overlap test: touching edges do not collide.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Moves by a fractional offset; the result truncates toward zero.
    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x = offset(self.x, dx);
        self.y = offset(self.y, dy);
    }
}

#[inline]
pub(crate) fn offset(coord: i32, delta: f64) -> i32 {
    (f64::from(coord) + delta) as i32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Wall,
    /// Marks the end of a chunk; used for progress accounting. Solid like a wall.
    End,
}

impl BlockKind {
    pub fn glyph(self) -> char {
        match self {
            BlockKind::Wall => 'W',
            BlockKind::End => 'E',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub rect: Rect,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(x: i32, y: i32, width: i32, height: i32, kind: BlockKind) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind,
        }
    }

    #[inline]
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.rect.translate(dx, dy);
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.kind == BlockKind::End
    }
}
