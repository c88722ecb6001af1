// rust/engine/src/engine/player.rs
#![forbid(unsafe_code)]

use crate::engine::action::Action;
use crate::engine::block::{offset, Block, Rect};
use crate::engine::config::Config;

/// Braking rule used when pushing against the current direction and on wall hits.
///
/// `|x / coeff| < 1` snaps to zero, otherwise the quotient is truncated toward zero.
#[inline]
pub fn slowdown(x_speed: f64, coeff: f64) -> f64 {
    let q = x_speed / coeff;
    if q.abs() < 1.0 {
        0.0
    } else {
        q.trunc()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub x_speed: f64,
    pub y_speed: f64,

    slowdown_x: f64,
    acceleration_x: f64,
    acceleration_y: f64,
    speed_x: f64,
    speed_y: f64,
    block_width: i32,
    mid_x: i32,
}

impl Player {
    /// Player at rest at the configured start position.
    pub fn new(cfg: &Config) -> Self {
        Self {
            rect: Rect::new(cfg.start_x, cfg.start_y(), cfg.player_width, cfg.player_height),
            x_speed: 0.0,
            y_speed: 0.0,
            slowdown_x: cfg.slowdown_x,
            acceleration_x: cfg.acceleration_x,
            acceleration_y: cfg.acceleration_y,
            speed_x: cfg.speed_x,
            speed_y: cfg.speed_y,
            block_width: cfg.block_width,
            mid_x: cfg.mid_x(),
        }
    }

    pub fn slowdown(&mut self) {
        self.x_speed = slowdown(self.x_speed, self.slowdown_x);
    }

    /**
     * Coarse "standing on" test.
     *
     * True iff some block's top touches the player's bottom edge and the player's left
     * edge lies within `block_width - 1` pixels of that block's left edge.
     */
    pub fn on_ground(&self, blocks: &[Block]) -> bool {
        let tol = self.block_width - 1;
        blocks.iter().any(|b| {
            self.rect.bottom() == b.rect.top()
                && self.rect.left() >= b.rect.left() - tol
                && self.rect.left() <= b.rect.left() + tol
        })
    }

    pub fn update_speed(&mut self, action: Action, blocks: &[Block]) {
        // Horizontal.
        if action.pushes_left() {
            if self.x_speed > 0.0 {
                self.slowdown();
            } else {
                self.x_speed -= self.acceleration_x;
            }
        } else if action.pushes_right() {
            if self.x_speed < 0.0 {
                self.slowdown();
            } else {
                self.x_speed += self.acceleration_x;
            }
        } else if self.x_speed > 0.0 {
            self.x_speed = (self.x_speed - 1.0).max(0.0);
        } else if self.x_speed < 0.0 {
            self.x_speed = (self.x_speed + 1.0).min(0.0);
        }

        // Vertical.
        let grounded = self.on_ground(blocks);
        if !grounded {
            self.y_speed += self.acceleration_y;
        }
        if action.jumps() && grounded {
            self.y_speed -= self.speed_y;
        }

        self.x_speed = self.x_speed.clamp(-self.speed_x, self.speed_x);
    }

    /// Moves the player, scrolling the world once it sits at mid-screen.
    ///
    /// Returns the horizontal shift applied to every block (0 when the camera did not move).
    pub fn update_coor(&mut self, blocks: &mut [Block]) -> i32 {
        self.rect.x = offset(self.rect.x, self.x_speed);

        if self.rect.x > self.mid_x {
            self.rect.x = self.mid_x;
        }
        if self.rect.x < 0 {
            self.rect.x = 0;
            self.x_speed = 0.0;
        }

        let mut shift = 0;
        if self.rect.x == self.mid_x && self.x_speed > 0.0 {
            for b in blocks.iter_mut() {
                b.translate(-self.x_speed, 0.0);
            }
            shift = (-self.x_speed) as i32;
        }

        self.collisions(self.x_speed, 0.0, blocks);

        self.rect.y = offset(self.rect.y, self.y_speed);
        self.collisions(0.0, self.y_speed, blocks);

        shift
    }

    /**
     * Snaps the player out of every overlapping block along the axis of the given speeds.
     *
     * Snap direction uses the speeds passed in, not the ones mutated by earlier hits in the
     * same pass, so stacked blocks resolve by repeated overwrite.
     */
    pub fn collisions(&mut self, x_speed: f64, y_speed: f64, blocks: &[Block]) {
        for b in blocks {
            if !self.rect.intersects(&b.rect) {
                continue;
            }

            if x_speed > 0.0 {
                self.rect.set_right(b.rect.left());
                self.slowdown();
            } else if x_speed < 0.0 {
                self.rect.set_left(b.rect.right());
                self.slowdown();
            }

            if y_speed > 0.0 {
                self.rect.set_bottom(b.rect.top());
                self.y_speed = 0.0;
            } else if y_speed < 0.0 {
                self.rect.set_top(b.rect.bottom());
                self.y_speed = 0.0;
            }
        }
    }

    /// One tick: speeds first, then position. Returns the camera shift.
    pub fn step(&mut self, action: Action, blocks: &mut [Block]) -> i32 {
        self.update_speed(action, blocks);
        self.update_coor(blocks)
    }
}
