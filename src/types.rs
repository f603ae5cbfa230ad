use glam::Vec2;
use thiserror::Error;

/// Tile-type identifier stored in the grid. `AIR` (0) is the empty sentinel.
pub type TileId = u16;

/// User-defined opaque key for dynamic bodies carried through queries and
/// trigger callbacks (e.g., pack your entity id).
pub type BodyKey = u64;

// --- Standard tile ids ------------------------------------------------------
// Terrain tiles (plain solids or decoration).
pub const AIR: TileId = 0;
pub const GRASS: TileId = 1;
pub const DIRT: TileId = 2;
pub const STONE: TileId = 3;
pub const SAND: TileId = 4;
pub const ROCK: TileId = 5;
pub const WALL: TileId = 6;
pub const WOOD: TileId = 7;
pub const LEAVES: TileId = 8;
pub const SNOW: TileId = 9;
pub const GRAVEL: TileId = 10;
pub const METAL: TileId = 11;
// Special-behavior tiles.
pub const WATER: TileId = 12;
pub const LAVA: TileId = 13;
pub const ICE: TileId = 14;
pub const SPIKES: TileId = 15;
pub const SPRING: TileId = 16;
pub const CONVEYOR_LEFT: TileId = 17;
pub const CONVEYOR_RIGHT: TileId = 18;
pub const BRICK: TileId = 19;

/// Conveyor push direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConveyorDir {
    Left,
    Right,
}

/// Behavior tag consulted by the collision dispatch table. Generation and
/// collision agree on what a tile *is* solely through this tag plus the
/// numeric fields on [`TileType`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TileBehavior {
    #[default]
    None,
    Spike,
    Spring,
    Ice,
    Conveyor(ConveyorDir),
    Breakable,
    Water,
    Lava,
}

/// Immutable physical description of one tile type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileType {
    pub id: TileId,
    /// Solid for narrow-phase resolution.
    pub collision: bool,
    /// Surface friction, 1.0 = full grip.
    pub friction: f32,
    /// Restitution applied by the caller's integrator on landing.
    pub bounce: f32,
    /// Damage dealt per interaction proc (spikes, lava).
    pub damage: u32,
    pub liquid: bool,
    /// Per-second velocity damping fraction while submerged, in [0, 1].
    pub viscosity: f32,
    pub behavior: TileBehavior,
}

impl TileType {
    /// Plain solid terrain tile.
    pub const fn solid(id: TileId) -> Self {
        Self {
            id,
            collision: true,
            friction: 1.0,
            bounce: 0.0,
            damage: 0,
            liquid: false,
            viscosity: 0.0,
            behavior: TileBehavior::None,
        }
    }

    /// Non-colliding decoration / empty tile.
    pub const fn empty(id: TileId) -> Self {
        Self {
            id,
            collision: false,
            friction: 0.0,
            bounce: 0.0,
            damage: 0,
            liquid: false,
            viscosity: 0.0,
            behavior: TileBehavior::None,
        }
    }

    /// Conservative fallback for unregistered ids: solid, full friction.
    /// Unknown tiles must never silently pass bodies through.
    pub const fn fallback(id: TileId) -> Self {
        Self::solid(id)
    }
}

/// Which face of the *body* touches the tile. A body standing on a tile makes
/// `Bottom` contact; head-bumping a block from below makes `Top` contact.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Per-tick snapshot of one dynamic body. Owned by the caller; this crate only
/// reads it during indexing and mutates velocity during tile resolution.
///
/// Coordinates are screen-style: +y is down, so upward velocity is negative.
#[derive(Copy, Clone, Debug)]
pub struct BodyState {
    pub key: BodyKey,
    pub center: Vec2,
    pub vel: Vec2,
    pub half_extents: Vec2,
    /// Caller-supplied tag (team, faction, ...) for trigger callbacks that
    /// index back into caller state.
    pub owner: u32,
    /// Whether the caller's integrator considers the body standing on ground.
    pub grounded: bool,
}

impl BodyState {
    pub fn aabb(&self) -> (Vec2, Vec2) {
        (self.center - self.half_extents, self.center + self.half_extents)
    }
}

/// Cosmetic consequence of a tile interaction, for a renderer/audio layer.
/// This crate decides *that* an effect occurs, never how it is presented.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub tile: TileId,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EffectKind {
    TileBreak,
    SpikeHit,
    SpringLaunch,
    Splash,
    LavaBurn,
}

/// Gameplay consequences of one body's tile resolution that the caller must
/// apply itself (health and friction live outside this crate).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BodyResponse {
    /// Damage accumulated this tick. Not rate-limited here; the caller gates
    /// repeat damage with its own invulnerability window.
    pub damage: u32,
    /// Friction override while on an ice-like surface, else `None`.
    pub friction: Option<f32>,
    /// Body overlapped at least one liquid cell this tick.
    pub submerged: bool,
}

/// World-level tuning for collision interactions.
#[derive(Clone, Debug)]
pub struct WorldConfig {
    /// Edge length of one tile in world units.
    pub tile_size: f32,
    /// Upward launch speed applied by springs (stored positive).
    pub spring_velocity: f32,
    /// Minimum upward speed required to break a breakable tile from below.
    pub break_speed: f32,
    /// Knockback speed applied away from a spike tile's center.
    pub spike_knockback: f32,
    /// Horizontal acceleration applied by conveyor tiles.
    pub conveyor_accel: f32,
    /// Upward counter-force applied while submerged in water.
    pub buoyancy: f32,
    /// Chance per tick that lava contact procs damage. Intentionally below
    /// 1.0 so entering lava is not instant death.
    pub lava_damage_chance: f64,
    /// Minimum downward speed for a splash effect on liquid contact.
    pub splash_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            spring_velocity: 520.0,
            break_speed: 120.0,
            spike_knockback: 180.0,
            conveyor_accel: 220.0,
            buoyancy: 300.0,
            lava_damage_chance: 0.35,
            splash_speed: 90.0,
        }
    }
}

/// Errors surfaced by grid construction and catalog registration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },
    #[error("tile id {0} is already registered")]
    DuplicateTileId(TileId),
}
