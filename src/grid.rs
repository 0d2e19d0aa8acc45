use crate::dungeon_gen::{CellKind, Corridor, DungeonGenerator, Room};
use crate::rng::RandomSource;
use crate::tile::{Tile, TileType};

/// The tile map: a dense `width * height` array of tiles plus the rooms and
/// corridors it was generated from. Coordinates outside the array have no tile.
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
    /// Generated rooms, kept for monster placement
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

impl Grid {
    /// Generate a dungeon. `anchor` (the player start) is guaranteed to be floor.
    pub fn generate(width: usize, height: usize, anchor: (i32, i32), rng: &mut dyn RandomSource) -> Self {
        let mut tiles = vec![Tile::default(); width * height];
        let layout = DungeonGenerator::new(width, height).generate(anchor, rng, |x, y, kind| {
            let tile_type = match kind {
                CellKind::Floor => TileType::Floor,
                CellKind::Wall => TileType::Wall,
            };
            tiles[y as usize * width + x as usize] = Tile::new(tile_type);
        });

        Self {
            width,
            height,
            tiles,
            rooms: layout.rooms,
            corridors: layout.corridors,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Tile> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(&self.tiles[y as usize * self.width + x as usize])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(&mut self.tiles[y as usize * self.width + x as usize])
    }

    /// Missing tiles are not walkable.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.get(x, y).map(|t| t.walkable()).unwrap_or(false)
    }

    /// Build a grid from rows of `#` (wall) and `.` (floor). Rooms are left empty.
    #[cfg(test)]
    pub fn from_ascii(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let tiles = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| match c {
                '.' => Tile::new(TileType::Floor),
                _ => Tile::new(TileType::Wall),
            })
            .collect();
        Self {
            width,
            height,
            tiles,
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }
}
