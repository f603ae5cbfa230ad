use glam::Vec2;
use rand::Rng;

use crate::types::*;

/// Public contract for the per-tick collision world.
///
/// Callers drive one tick per frame, strictly in order: `begin_tick`, then
/// `push_body` for every live body, then resolution and trigger checks, then
/// `drain_effects`. The spatial index is rebuilt from scratch every tick;
/// nothing is carried over.
pub trait CollisionApi {
    // --- Tick lifecycle ----------------------------------------------------

    /// Begin a tick. Clears the spatial index and the effect buffer.
    fn begin_tick(&mut self);

    /// Index one body snapshot for this tick's proximity queries.
    fn push_body(&mut self, body: &BodyState);

    /// Resolve one body against the tiles its bounds overlap. Mutates the
    /// body's velocity in place; returns damage / friction consequences.
    fn resolve_body<R: Rng>(&mut self, body: &mut BodyState, dt: f32, rng: &mut R)
    -> BodyResponse;

    /// Test all trigger zones against the given body set.
    fn check_triggers(&mut self, bodies: &[BodyState]);

    /// Drain the effect-request records accumulated since `begin_tick`.
    fn drain_effects(&mut self) -> Vec<Effect>;

    // --- Queries -----------------------------------------------------------

    /// De-duplicated keys of bodies indexed near `center` this tick.
    fn nearby(&self, center: Vec2, radius: f32) -> Vec<BodyKey>;

    // --- Grid mutation -----------------------------------------------------

    /// Remove a tile (set its cell to air). Idempotent: air stays air, no
    /// error. Returns whether a tile was actually removed.
    fn break_tile(&mut self, x: i32, y: i32) -> bool;
}
