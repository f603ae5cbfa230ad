use glam::Vec2;
use rand::Rng;

use crate::api::CollisionApi;
use crate::catalog::TileCatalog;
use crate::grid::TileGrid;
use crate::spatial::SpatialGrid;
use crate::types::*;

/// Identifier for a registered trigger zone.
pub type TriggerId = u32;

/// What a trigger callback wants done with its trigger after firing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Keep,
    Remove,
}

type TriggerFn = Box<dyn FnMut(BodyKey) -> TriggerOutcome>;

struct Trigger {
    id: TriggerId,
    min: Vec2,
    max: Vec2,
    callback: TriggerFn,
}

/// Binds dynamic bodies to the tile grid: broad-phase indexing, contact-side
/// classification, tile-behavior dispatch, trigger zones, and tile breaking.
///
/// The grid is owned here; breaking a tile routes through `break_tile` and
/// is visible to every subsequent query in the same tick.
pub struct CollisionWorld {
    pub cfg: WorldConfig,
    catalog: TileCatalog,
    grid: TileGrid,
    spatial: SpatialGrid,
    triggers: Vec<Trigger>,
    next_trigger: TriggerId,
    effects: Vec<Effect>,
    ticked: bool,
}

impl CollisionWorld {
    pub fn new(catalog: TileCatalog, grid: TileGrid, cfg: WorldConfig) -> Self {
        let spatial = SpatialGrid::new(cfg.tile_size * 2.0);
        Self {
            cfg,
            catalog,
            grid,
            spatial,
            triggers: Vec::new(),
            next_trigger: 0,
            effects: Vec::new(),
            ticked: false,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Register an axis-aligned trigger zone. The callback fires once per
    /// overlapping body per `check_triggers` call and may remove its own
    /// trigger by returning [`TriggerOutcome::Remove`].
    pub fn add_trigger<F>(&mut self, min: Vec2, max: Vec2, callback: F) -> TriggerId
    where
        F: FnMut(BodyKey) -> TriggerOutcome + 'static,
    {
        let id = self.next_trigger;
        self.next_trigger += 1;
        self.triggers.push(Trigger {
            id,
            min,
            max,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a trigger. Unknown ids are a no-op.
    pub fn remove_trigger(&mut self, id: TriggerId) -> bool {
        let before = self.triggers.len();
        self.triggers.retain(|t| t.id != id);
        self.triggers.len() != before
    }

    fn effect(&mut self, kind: EffectKind, at: Vec2, tile: TileId) {
        self.effects.push(Effect {
            kind,
            x: at.x,
            y: at.y,
            tile,
        });
    }
}

impl CollisionApi for CollisionWorld {
    fn begin_tick(&mut self) {
        self.spatial.clear();
        self.effects.clear();
        self.ticked = true;
    }

    fn push_body(&mut self, body: &BodyState) {
        debug_assert!(self.ticked, "push_body before begin_tick");
        let (min, max) = body.aabb();
        self.spatial.insert(body.key, min, max);
    }

    /// Resolve one body against every non-air tile its bounds overlap,
    /// dispatching on each tile's behavior tag. Velocity changes are applied
    /// to `body` in place; damage and friction overrides come back in the
    /// response; cosmetic consequences land in the effect buffer.
    ///
    /// Lava damage rolls the injected `rng` each tick so contact is not
    /// instantly lethal; the caller decides how to rate-limit spike damage.
    fn resolve_body<R: Rng>(
        &mut self,
        body: &mut BodyState,
        dt: f32,
        rng: &mut R,
    ) -> BodyResponse {
        debug_assert!(self.ticked, "resolve_body before begin_tick");
        let mut resp = BodyResponse::default();
        let ts = self.cfg.tile_size;
        let (min, max) = body.aabb();
        let tx0 = (min.x / ts).floor() as i32;
        let ty0 = (min.y / ts).floor() as i32;
        let tx1 = (max.x / ts).floor() as i32;
        let ty1 = (max.y / ts).floor() as i32;
        // Liquid contact is collected during the scan and applied once after
        // it: a body straddling several liquid cells must not be damped,
        // buoyed, or burn-rolled more than once per tick.
        let mut max_viscosity = 0.0f32;
        let mut water_at: Option<(Vec2, TileId)> = None;
        let mut lava_at: Option<(Vec2, TileId, u32)> = None;

        for ty in ty0..=ty1 {
            for tx in tx0..=tx1 {
                if !self.grid.in_bounds(tx, ty) {
                    continue;
                }
                let id = self.grid.get(tx, ty);
                if id == AIR {
                    continue;
                }
                let tile = self.catalog.get(id);
                let tile_center = Vec2::new((tx as f32 + 0.5) * ts, (ty as f32 + 0.5) * ts);

                match tile.behavior {
                    TileBehavior::Water => {
                        resp.submerged = true;
                        max_viscosity = max_viscosity.max(tile.viscosity);
                        water_at.get_or_insert((tile_center, id));
                    }
                    TileBehavior::Lava => {
                        resp.submerged = true;
                        max_viscosity = max_viscosity.max(tile.viscosity);
                        lava_at.get_or_insert((tile_center, id, tile.damage));
                    }
                    TileBehavior::Spike => {
                        resp.damage += tile.damage;
                        let away = (body.center - tile_center).normalize_or_zero();
                        body.vel += away * self.cfg.spike_knockback;
                        self.effect(EffectKind::SpikeHit, tile_center, id);
                    }
                    TileBehavior::Spring => {
                        if classify_side(body.center, tile_center) == ContactSide::Bottom {
                            body.vel.y = -self.cfg.spring_velocity;
                            self.effect(EffectKind::SpringLaunch, tile_center, id);
                        }
                    }
                    TileBehavior::Ice => {
                        if body.grounded {
                            resp.friction = Some(tile.friction);
                        }
                    }
                    TileBehavior::Conveyor(dir) => {
                        if body.grounded
                            && classify_side(body.center, tile_center) == ContactSide::Bottom
                        {
                            let sign = match dir {
                                ConveyorDir::Left => -1.0,
                                ConveyorDir::Right => 1.0,
                            };
                            body.vel.x += sign * self.cfg.conveyor_accel * dt;
                        }
                    }
                    TileBehavior::Breakable => {
                        if classify_side(body.center, tile_center) == ContactSide::Top
                            && body.vel.y < -self.cfg.break_speed
                        {
                            self.break_tile(tx, ty);
                        }
                    }
                    TileBehavior::None => {}
                }
            }
        }

        if let Some((at, id)) = water_at {
            if body.vel.y > self.cfg.splash_speed {
                self.effect(EffectKind::Splash, at, id);
            }
        }
        if resp.submerged {
            damp(body, max_viscosity, dt);
        }
        if water_at.is_some() {
            // Buoyancy counters gravity (+y is down).
            body.vel.y -= self.cfg.buoyancy * dt;
        }
        if let Some((at, id, damage)) = lava_at {
            if rng.gen_bool(self.cfg.lava_damage_chance) {
                resp.damage += damage;
                self.effect(EffectKind::LavaBurn, at, id);
            }
        }
        resp
    }

    /// Test every trigger against every body by direct AABB overlap. Cost is
    /// O(triggers x bodies); fine while the trigger count stays small, and
    /// not worth indexing until it isn't.
    fn check_triggers(&mut self, bodies: &[BodyState]) {
        let mut dead: Vec<TriggerId> = Vec::new();
        for t in &mut self.triggers {
            for b in bodies {
                let (bmin, bmax) = b.aabb();
                let hit = bmin.x <= t.max.x
                    && bmax.x >= t.min.x
                    && bmin.y <= t.max.y
                    && bmax.y >= t.min.y;
                if hit && (t.callback)(b.key) == TriggerOutcome::Remove {
                    dead.push(t.id);
                    break;
                }
            }
        }
        self.triggers.retain(|t| !dead.contains(&t.id));
    }

    fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn nearby(&self, center: Vec2, radius: f32) -> Vec<BodyKey> {
        self.spatial.get_nearby(center, radius)
    }

    fn break_tile(&mut self, x: i32, y: i32) -> bool {
        if !self.grid.in_bounds(x, y) {
            return false;
        }
        let id = self.grid.get(x, y);
        if id == AIR {
            return false;
        }
        self.grid.set(x, y, AIR);
        let ts = self.cfg.tile_size;
        let center = Vec2::new((x as f32 + 0.5) * ts, (y as f32 + 0.5) * ts);
        self.effect(EffectKind::TileBreak, center, id);
        true
    }
}

/// Classify which face of the body touches a tile from the center delta.
/// Horizontal wins ties (`|dx| == |dy|`): an explicit, reproducible rule.
pub fn classify_side(body_center: Vec2, tile_center: Vec2) -> ContactSide {
    let d = body_center - tile_center;
    if d.x.abs() >= d.y.abs() {
        if d.x >= 0.0 {
            ContactSide::Left
        } else {
            ContactSide::Right
        }
    } else if d.y > 0.0 {
        ContactSide::Top
    } else {
        ContactSide::Bottom
    }
}

fn damp(body: &mut BodyState, viscosity: f32, dt: f32) {
    body.vel *= (1.0 - viscosity * dt).clamp(0.0, 1.0);
}
