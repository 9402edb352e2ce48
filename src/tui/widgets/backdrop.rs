//! Decorative animated background drawn behind every section.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tui::theme::Palette;

/// Something drawn beneath the section content.
///
/// Implementations get the animation tick, terminal resizes and pointer
/// movement; they never see keyboard input.
pub trait Backdrop {
    fn on_tick(&mut self);
    fn on_resize(&mut self, area: Rect);
    fn on_pointer(&mut self, position: Position);
    fn render(&self, buf: &mut Buffer, palette: &Palette);
}

/// Stars within this many cells of the pointer drift toward it.
const POINTER_RADIUS: f32 = 8.0;
/// Fraction of the distance to the pointer covered per tick.
const POINTER_PULL: f32 = 0.08;
/// Twinkle speed in radians per tick.
const TWINKLE_RATE: f32 = 0.07;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    x: f32,
    y: f32,
    /// Rows per tick.
    speed: f32,
    phase: f32,
}

pub struct Starfield {
    stars: Vec<Star>,
    count: usize,
    area: Rect,
    pointer: Option<(f32, f32)>,
    tick: u64,
    rng: StdRng,
}

impl Starfield {
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, StdRng::from_entropy())
    }

    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, rng: StdRng) -> Self {
        Self {
            stars: Vec::with_capacity(count),
            count,
            area: Rect::default(),
            pointer: None,
            tick: 0,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    fn populate(&mut self) {
        let (w, h) = (self.area.width as f32, self.area.height as f32);
        self.stars = (0..self.count)
            .map(|_| Star {
                x: self.rng.gen_range(0.0..w),
                y: self.rng.gen_range(0.0..h),
                speed: self.rng.gen_range(0.01..0.06),
                phase: self.rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect();
    }

    fn brightness(&self, star: &Star) -> f32 {
        ((self.tick as f32 * TWINKLE_RATE + star.phase).sin() + 1.0) / 2.0
    }
}

impl Backdrop for Starfield {
    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        let (w, h) = (self.area.width as f32, self.area.height as f32);
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        for star in &mut self.stars {
            if let Some((px, py)) = self.pointer {
                let (dx, dy) = (px - star.x, py - star.y);
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > 0.5 && dist < POINTER_RADIUS {
                    star.x += dx * POINTER_PULL;
                    star.y += dy * POINTER_PULL;
                }
            }
            star.y += star.speed;
            // rem_euclid can round up to the modulus for tiny negatives
            star.x = star.x.rem_euclid(w) % w;
            star.y = star.y.rem_euclid(h) % h;
        }
    }

    fn on_resize(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        let old = self.area;
        self.area = area;

        if area.is_empty() {
            self.stars.clear();
        } else if old.is_empty() || self.stars.is_empty() {
            self.populate();
        } else {
            let sx = area.width as f32 / old.width as f32;
            let sy = area.height as f32 / old.height as f32;
            let (w, h) = (area.width as f32, area.height as f32);
            for star in &mut self.stars {
                star.x = (star.x * sx).min(w - 0.01);
                star.y = (star.y * sy).min(h - 0.01);
            }
        }
    }

    fn on_pointer(&mut self, position: Position) {
        self.pointer = self.area.contains(position).then(|| {
            (
                (position.x - self.area.x) as f32,
                (position.y - self.area.y) as f32,
            )
        });
    }

    fn render(&self, buf: &mut Buffer, palette: &Palette) {
        for star in &self.stars {
            let x = self.area.x + star.x as u16;
            let y = self.area.y + star.y as u16;
            let b = self.brightness(star);
            let (symbol, color): (&str, Color) = if b > 0.85 {
                ("✦", palette.accent)
            } else if b > 0.45 {
                ("·", palette.text_dim)
            } else {
                (".", palette.text_dim)
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_fg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(area: Rect) -> Starfield {
        let mut stars = Starfield::seeded(40, 7);
        stars.on_resize(area);
        stars
    }

    #[test]
    fn test_populates_on_first_resize() {
        let mut stars = Starfield::seeded(40, 7);
        assert!(stars.is_empty());
        stars.on_resize(Rect::new(0, 0, 80, 24));
        assert_eq!(stars.len(), 40);
    }

    #[test]
    fn test_stars_stay_in_bounds() {
        let mut stars = field(Rect::new(0, 0, 80, 24));
        stars.on_pointer(Position::new(40, 12));
        for _ in 0..1000 {
            stars.on_tick();
        }
        for s in &stars.stars {
            assert!(s.x >= 0.0 && s.x < 80.0, "x out of range: {}", s.x);
            assert!(s.y >= 0.0 && s.y < 24.0, "y out of range: {}", s.y);
        }
    }

    #[test]
    fn test_resize_rescales_positions() {
        let mut stars = field(Rect::new(0, 0, 100, 40));
        let before = stars.stars.clone();
        stars.on_resize(Rect::new(0, 0, 50, 20));
        for (old, new) in before.iter().zip(&stars.stars) {
            assert!((new.x - (old.x / 2.0).min(49.99)).abs() < 0.01);
            assert!((new.y - (old.y / 2.0).min(19.99)).abs() < 0.01);
        }
    }

    #[test]
    fn test_pointer_attracts_nearby_star() {
        let mut stars = field(Rect::new(0, 0, 80, 24));
        stars.stars = vec![Star {
            x: 20.0,
            y: 10.0,
            speed: 0.0,
            phase: 0.0,
        }];
        stars.on_pointer(Position::new(24, 10));
        stars.on_tick();
        assert!(stars.stars[0].x > 20.0);
        assert!(stars.stars[0].x < 24.0);
    }

    #[test]
    fn test_far_pointer_is_ignored() {
        let mut stars = field(Rect::new(0, 0, 80, 24));
        stars.stars = vec![Star {
            x: 5.0,
            y: 5.0,
            speed: 0.0,
            phase: 0.0,
        }];
        stars.on_pointer(Position::new(70, 20));
        stars.on_tick();
        assert_eq!(stars.stars[0].x, 5.0);
    }

    #[test]
    fn test_pointer_outside_area_clears() {
        let mut stars = field(Rect::new(10, 2, 40, 10));
        stars.on_pointer(Position::new(15, 5));
        assert_eq!(stars.pointer, Some((5.0, 3.0)));
        stars.on_pointer(Position::new(0, 0));
        assert_eq!(stars.pointer, None);
    }

    #[test]
    fn test_render_stays_inside_area() {
        let area = Rect::new(0, 0, 30, 10);
        let stars = field(area);
        let mut buf = Buffer::empty(area);
        stars.render(&mut buf, &Palette::DARK);
        let drawn = buf.content().iter().filter(|c| c.symbol() != " ").count();
        assert!(drawn > 0 && drawn <= 40);
    }
}
