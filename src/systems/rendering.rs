//! Projection of map, entities and light into a character grid.

use std::collections::HashMap;

use glam::Vec3;
use hecs::World;

use crate::components::{Glyph, Kind, Position};
use crate::constants::*;
use crate::fov::LightMap;
use crate::grid::Grid;

/// A drawn viewport cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Vec3,
    pub bg: Vec3,
}

/// Anything that can show a character grid.
pub trait DisplaySink {
    fn clear(&mut self);
    fn draw(&mut self, x: i32, y: i32, ch: char, fg: Vec3, bg: Vec3);
}

/// One frame of the viewport. `None` cells are left blank.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Option<Cell>>,
}

impl GlyphGrid {
    #[cfg(test)]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        self.cells[y as usize * self.width + x as usize].as_ref()
    }

    /// Clear the sink and draw every non-blank cell.
    pub fn present(&self, sink: &mut dyn DisplaySink) {
        sink.clear();
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(cell) = &self.cells[y * self.width + x] {
                    sink.draw(x as i32, y as i32, cell.ch, cell.fg, cell.bg);
                }
            }
        }
    }
}

/// Background for a tile, keyed by (lit, wall).
pub fn map_color(lit: bool, wall: bool) -> Vec3 {
    match (lit, wall) {
        (false, false) => UNLIT_FLOOR,
        (false, true) => UNLIT_WALL,
        (true, false) => LIT_FLOOR,
        (true, true) => LIT_WALL,
    }
}

/// Glyph of the highest render order entity on each occupied cell.
///
/// Entities are sorted ascending by render order (ties in insertion order)
/// and later entries overwrite earlier ones.
pub fn compute_glyph_map(world: &World) -> HashMap<(i32, i32), Glyph> {
    let mut entities: Vec<(u32, i32, (i32, i32), Glyph)> = world
        .query::<(&Position, &Kind)>()
        .iter()
        .map(|(id, (pos, kind))| (id.id(), kind.0.render_order(), (pos.x, pos.y), kind.0.glyph()))
        .collect();
    entities.sort_by_key(|&(id, order, _, _)| (order, id));

    let mut glyphs = HashMap::new();
    for (_, _, pos, glyph) in entities {
        glyphs.insert(pos, glyph);
    }
    glyphs
}

/// Build the viewport frame.
pub fn project(
    grid: &Grid,
    world: &World,
    light_map: &LightMap,
    debug_reveal: bool,
    viewport: (usize, usize),
) -> GlyphGrid {
    puffin::profile_function!();

    let (width, height) = viewport;
    let glyphs = compute_glyph_map(world);
    let mut cells = Vec::with_capacity(width * height);

    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let Some(tile) = grid.get(x, y) else {
                cells.push(None);
                continue;
            };
            if !debug_reveal && !tile.explored {
                cells.push(None);
                continue;
            }

            let lit = debug_reveal || light_map.is_lit(x, y);
            let mut cell = Cell {
                ch: ' ',
                fg: DEFAULT_FG,
                bg: map_color(lit, tile.is_wall()),
            };

            if let Some(glyph) = glyphs.get(&(x, y)) {
                if lit {
                    cell.ch = glyph.ch;
                }
                cell.fg = glyph.fg;
                if let Some(bg) = glyph.bg {
                    cell.bg = bg;
                }
            }

            cells.push(Some(cell));
        }
    }

    GlyphGrid { width, height, cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::EntityKind;
    use crate::fov::compute_light_map;

    #[derive(Default)]
    struct RecordingSink {
        cleared: usize,
        draws: Vec<(i32, i32, char)>,
    }

    impl DisplaySink for RecordingSink {
        fn clear(&mut self) {
            self.cleared += 1;
            self.draws.clear();
        }

        fn draw(&mut self, x: i32, y: i32, ch: char, _fg: Vec3, _bg: Vec3) {
            self.draws.push((x, y, ch));
        }
    }

    fn room() -> Grid {
        Grid::from_ascii(&[
            "############",
            "#....#.....#",
            "#....#.....#",
            "#..........#",
            "############",
        ])
    }

    #[test]
    fn test_unexplored_tiles_are_blank() {
        let grid = room();
        let world = World::new();
        let frame = project(&grid, &world, &LightMap::default(), false, (12, 5));
        assert!(frame.get(1, 1).is_none());
    }

    #[test]
    fn test_lit_and_remembered_backgrounds() {
        let mut grid = room();
        let mut world = World::new();
        world.spawn((Position::new(1, 1), Kind(EntityKind::Player)));

        // Explore from the far corner, then look from (1, 1)
        compute_light_map((10, 1), &mut grid, 10);
        let light = compute_light_map((1, 1), &mut grid, 3);
        let frame = project(&grid, &world, &light, false, (12, 5));

        assert_eq!(frame.get(2, 2).unwrap().bg, LIT_FLOOR);
        assert_eq!(frame.get(0, 0).unwrap().bg, LIT_WALL);
        assert_eq!(frame.get(10, 1).unwrap().bg, UNLIT_FLOOR);
        assert_eq!(frame.get(11, 1).unwrap().bg, UNLIT_WALL);
        assert_eq!(frame.get(1, 1).unwrap().ch, '@');
    }

    #[test]
    fn test_unlit_entity_shows_color_but_not_glyph() {
        let mut grid = room();
        let mut world = World::new();
        world.spawn((Position::new(9, 1), Kind(EntityKind::Orc)));
        compute_light_map((9, 2), &mut grid, 10);
        let light = compute_light_map((1, 1), &mut grid, 2);

        let frame = project(&grid, &world, &light, false, (12, 5));
        let cell = frame.get(9, 1).unwrap();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.fg, ORC_COLOR);
        assert_eq!(cell.bg, UNLIT_FLOOR);

        // Debug reveal lights it again
        let frame = project(&grid, &world, &light, true, (12, 5));
        assert_eq!(frame.get(9, 1).unwrap().ch, 'o');
    }

    #[test]
    fn test_highest_render_order_wins() {
        let mut grid = room();
        let mut world = World::new();
        world.spawn((Position::new(2, 2), Kind(EntityKind::Orc)));
        world.spawn((Position::new(2, 2), Kind(EntityKind::Corpse)));
        let light = compute_light_map((2, 2), &mut grid, 5);
        let frame = project(&grid, &world, &light, false, (12, 5));
        assert_eq!(frame.get(2, 2).unwrap().ch, 'o');

        let glyphs = compute_glyph_map(&world);
        assert_eq!(glyphs.len(), 1);
    }

    #[test]
    fn test_debug_reveal_lights_everything() {
        let grid = room();
        let world = World::new();
        let frame = project(&grid, &world, &LightMap::default(), true, (12, 5));
        assert_eq!(frame.get(10, 3).unwrap().bg, LIT_FLOOR);
        assert_eq!(frame.get(5, 1).unwrap().bg, LIT_WALL);
    }

    #[test]
    fn test_viewport_beyond_map_is_blank() {
        let grid = room();
        let world = World::new();
        let frame = project(&grid, &world, &LightMap::default(), true, (20, 8));
        assert!(frame.get(15, 6).is_none());
        assert!(frame.get(3, 3).is_some());
    }

    #[test]
    fn test_present_draws_only_visible_cells() {
        let mut grid = room();
        let world = World::new();
        let light = compute_light_map((1, 1), &mut grid, 1);
        let frame = project(&grid, &world, &light, false, (12, 5));

        let mut sink = RecordingSink::default();
        frame.present(&mut sink);
        assert_eq!(sink.cleared, 1);
        assert!(sink.draws.contains(&(1, 1, ' ')));
        assert!(!sink.draws.iter().any(|&(x, _, _)| x > 3));
    }
}
