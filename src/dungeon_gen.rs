use crate::constants::*;
use crate::rng::RandomSource;

/// What the generator emits for each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Floor,
    Wall,
}

/// A rectangle representing a BSP region
#[derive(Clone, Copy, Debug)]
struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// A carved room. All four bounds are inclusive floor coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Room {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Room {
    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    /// Check if a point is inside this room
    #[cfg(test)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// A straight corridor segment between two inclusive endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corridor {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

/// A node in the BSP tree. Either a leaf (contains a room) or an internal node (has two children).
struct BspNode {
    region: Rect,
    room: Option<Room>,
    left: Option<Box<BspNode>>,
    right: Option<Box<BspNode>>,
}

impl BspNode {
    fn new(region: Rect) -> Self {
        Self {
            region,
            room: None,
            left: None,
            right: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Recursively split this node until leaves are small enough for rooms.
    fn split(&mut self, rng: &mut dyn RandomSource) {
        if self.region.width < DUNGEON_MIN_LEAF_SIZE * 2 && self.region.height < DUNGEON_MIN_LEAF_SIZE * 2 {
            return;
        }

        // Prefer splitting the longer axis
        let split_horizontal = if self.region.width > self.region.height * 2 {
            false
        } else if self.region.height > self.region.width * 2 {
            true
        } else {
            rng.coin()
        };

        if split_horizontal {
            if self.region.height < DUNGEON_MIN_LEAF_SIZE * 2 {
                return;
            }

            let split_y = rng.uniform_int(DUNGEON_MIN_LEAF_SIZE, self.region.height - DUNGEON_MIN_LEAF_SIZE);

            let top = Rect::new(self.region.x, self.region.y, self.region.width, split_y);
            let bottom = Rect::new(
                self.region.x,
                self.region.y + split_y,
                self.region.width,
                self.region.height - split_y,
            );

            self.left = Some(Box::new(BspNode::new(top)));
            self.right = Some(Box::new(BspNode::new(bottom)));
        } else {
            if self.region.width < DUNGEON_MIN_LEAF_SIZE * 2 {
                return;
            }

            let split_x = rng.uniform_int(DUNGEON_MIN_LEAF_SIZE, self.region.width - DUNGEON_MIN_LEAF_SIZE);

            let left = Rect::new(self.region.x, self.region.y, split_x, self.region.height);
            let right = Rect::new(
                self.region.x + split_x,
                self.region.y,
                self.region.width - split_x,
                self.region.height,
            );

            self.left = Some(Box::new(BspNode::new(left)));
            self.right = Some(Box::new(BspNode::new(right)));
        }

        if let Some(ref mut left) = self.left {
            left.split(rng);
        }
        if let Some(ref mut right) = self.right {
            right.split(rng);
        }
    }

    /// Create a room in each leaf node.
    fn create_rooms(&mut self, rng: &mut dyn RandomSource) {
        if self.is_leaf() {
            let max_width = self.region.width - DUNGEON_ROOM_MARGIN * 2;
            let max_height = self.region.height - DUNGEON_ROOM_MARGIN * 2;

            if max_width < DUNGEON_MIN_ROOM_SIZE || max_height < DUNGEON_MIN_ROOM_SIZE {
                return;
            }

            let room_width = rng.uniform_int(DUNGEON_MIN_ROOM_SIZE, max_width);
            let room_height = rng.uniform_int(DUNGEON_MIN_ROOM_SIZE, max_height);

            let left = self.region.x + DUNGEON_ROOM_MARGIN + rng.uniform_int(0, max_width - room_width);
            let top = self.region.y + DUNGEON_ROOM_MARGIN + rng.uniform_int(0, max_height - room_height);

            self.room = Some(Room {
                left,
                right: left + room_width - 1,
                top,
                bottom: top + room_height - 1,
            });
        } else {
            if let Some(ref mut left) = self.left {
                left.create_rooms(rng);
            }
            if let Some(ref mut right) = self.right {
                right.create_rooms(rng);
            }
        }
    }

    /// Room from the left-most leaf of this subtree, used as a corridor endpoint.
    fn get_room(&self) -> Option<Room> {
        if let Some(room) = self.room {
            return Some(room);
        }
        self.left
            .as_ref()
            .and_then(|left| left.get_room())
            .or_else(|| self.right.as_ref().and_then(|right| right.get_room()))
    }

    fn collect_rooms(&self, rooms: &mut Vec<Room>) {
        if let Some(room) = self.room {
            rooms.push(room);
        }
        if let Some(ref left) = self.left {
            left.collect_rooms(rooms);
        }
        if let Some(ref right) = self.right {
            right.collect_rooms(rooms);
        }
    }
}

/// Rooms and corridors of a generated dungeon. The cells themselves are
/// delivered through the `emit` callback of [`DungeonGenerator::generate`].
#[derive(Debug, Clone, Default)]
pub struct DungeonLayout {
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
}

/// BSP room-and-corridor generator.
pub struct DungeonGenerator {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
    corridors: Vec<Corridor>,
}

impl DungeonGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellKind::Wall; width * height],
            corridors: Vec::new(),
        }
    }

    /// Generate a dungeon and emit every cell as `(x, y, kind)`.
    ///
    /// `anchor` is guaranteed to end up as floor connected to the first room.
    /// It must lie inside the map.
    pub fn generate(
        mut self,
        anchor: (i32, i32),
        rng: &mut dyn RandomSource,
        mut emit: impl FnMut(i32, i32, CellKind),
    ) -> DungeonLayout {
        let mut root = BspNode::new(Rect::new(0, 0, self.width as i32, self.height as i32));
        root.split(rng);
        root.create_rooms(rng);

        let mut rooms = Vec::new();
        root.collect_rooms(&mut rooms);

        for room in &rooms {
            self.carve_room(room);
        }

        self.connect_bsp(&root, rng);

        if self.get_cell(anchor.0, anchor.1) != Some(CellKind::Floor) {
            self.set_cell(anchor.0, anchor.1, CellKind::Floor);
            if let Some(first) = rooms.first() {
                let target = first.center();
                self.connect_points(anchor, target, rng);
            }
        }

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                emit(x, y, self.cells[y as usize * self.width + x as usize]);
            }
        }

        DungeonLayout {
            rooms,
            corridors: self.corridors,
        }
    }

    fn get_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn get_cell(&self, x: i32, y: i32) -> Option<CellKind> {
        self.get_index(x, y).map(|idx| self.cells[idx])
    }

    fn set_cell(&mut self, x: i32, y: i32, kind: CellKind) {
        if let Some(idx) = self.get_index(x, y) {
            self.cells[idx] = kind;
        }
    }

    fn carve_room(&mut self, room: &Room) {
        for y in room.top..=room.bottom {
            for x in room.left..=room.right {
                self.set_cell(x, y, CellKind::Floor);
            }
        }
    }

    /// Connect rooms by traversing the BSP tree and linking sibling subtrees.
    fn connect_bsp(&mut self, node: &BspNode, rng: &mut dyn RandomSource) {
        if node.is_leaf() {
            return;
        }

        if let Some(ref left) = node.left {
            self.connect_bsp(left, rng);
        }
        if let Some(ref right) = node.right {
            self.connect_bsp(right, rng);
        }

        if let (Some(ref left), Some(ref right)) = (&node.left, &node.right) {
            if let (Some(left_room), Some(right_room)) = (left.get_room(), right.get_room()) {
                self.connect_points(left_room.center(), right_room.center(), rng);
            }
        }
    }

    /// Connect two points with an L-shaped corridor.
    fn connect_points(&mut self, from: (i32, i32), to: (i32, i32), rng: &mut dyn RandomSource) {
        let (x1, y1) = from;
        let (x2, y2) = to;

        // Horizontal-then-vertical or vertical-then-horizontal
        if rng.coin() {
            self.create_h_corridor(x1, x2, y1);
            self.create_v_corridor(y1, y2, x2);
        } else {
            self.create_v_corridor(y1, y2, x1);
            self.create_h_corridor(x1, x2, y2);
        }
    }

    fn create_h_corridor(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_cell(x, y, CellKind::Floor);
        }
        self.corridors.push(Corridor {
            start: (x1, y),
            end: (x2, y),
        });
    }

    fn create_v_corridor(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set_cell(x, y, CellKind::Floor);
        }
        self.corridors.push(Corridor {
            start: (x, y1),
            end: (x, y2),
        });
    }
}
