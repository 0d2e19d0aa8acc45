use crate::constants::*;
use glam::Vec3;

/// Position component - grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What an entity is. Blocking, draw order and glyph all follow from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Troll,
    Orc,
    Corpse,
}

/// Character, foreground and optional background for one cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Vec3,
    pub bg: Option<Vec3>,
}

/// Attributes shared by every entity of a kind
#[derive(Debug, Clone, Copy)]
pub struct KindProps {
    pub blocks: bool,
    pub render_order: i32,
    pub glyph: Glyph,
}

const PLAYER_PROPS: KindProps = KindProps {
    blocks: true,
    render_order: 9,
    glyph: Glyph { ch: '@', fg: PLAYER_COLOR, bg: None },
};
const TROLL_PROPS: KindProps = KindProps {
    blocks: true,
    render_order: 6,
    glyph: Glyph { ch: 'T', fg: TROLL_COLOR, bg: None },
};
const ORC_PROPS: KindProps = KindProps {
    blocks: true,
    render_order: 6,
    glyph: Glyph { ch: 'o', fg: ORC_COLOR, bg: None },
};
const CORPSE_PROPS: KindProps = KindProps {
    blocks: false,
    render_order: 0,
    glyph: Glyph { ch: '%', fg: CORPSE_COLOR, bg: None },
};

impl EntityKind {
    pub fn props(&self) -> &'static KindProps {
        match self {
            EntityKind::Player => &PLAYER_PROPS,
            EntityKind::Troll => &TROLL_PROPS,
            EntityKind::Orc => &ORC_PROPS,
            EntityKind::Corpse => &CORPSE_PROPS,
        }
    }

    pub fn blocks(&self) -> bool {
        self.props().blocks
    }

    pub fn render_order(&self) -> i32 {
        self.props().render_order
    }

    pub fn glyph(&self) -> Glyph {
        self.props().glyph
    }

    /// Lowercase tag used in combat messages
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Player => "player",
            EntityKind::Troll => "troll",
            EntityKind::Orc => "orc",
            EntityKind::Corpse => "corpse",
        }
    }
}

/// Kind component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kind(pub EntityKind);

/// Display name; becomes "<name>'s corpse" on death
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

/// Combat stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fighter {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self { hp, defense, power }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }
}

/// Monster behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiBehavior {
    MoveToPlayer,
}

/// AI component, removed when the entity dies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ai(pub AiBehavior);

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Marker added once when an entity dies
#[derive(Debug, Clone, Copy)]
pub struct Dead;
