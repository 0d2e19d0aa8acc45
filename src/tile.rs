/// Terrain produced by the dungeon generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileType {
    Floor,
    Wall,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor)
    }
}

/// One map cell. `tile_type` is fixed at generation; `explored` only ever
/// goes from false to true.
#[derive(Debug, Clone)]
pub struct Tile {
    pub tile_type: TileType,
    pub explored: bool,
}

impl Tile {
    pub fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            explored: false,
        }
    }

    pub fn walkable(&self) -> bool {
        self.tile_type.is_walkable()
    }

    pub fn is_wall(&self) -> bool {
        self.tile_type == TileType::Wall
    }

    /// Mark as explored. Never reverts.
    pub fn explore(&mut self) {
        self.explored = true;
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::new(TileType::Wall)
    }
}
