use std::collections::HashMap;

use crate::types::*;

/// Registry mapping tile ids to their physical properties.
///
/// Lookups never fail: unregistered ids resolve to a conservative solid
/// default so an unknown tile blocks movement instead of passing bodies
/// through. The miss is logged, never fatal.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    tiles: HashMap<TileId, TileType>,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tile type. Duplicate ids are rejected.
    pub fn register(&mut self, tile: TileType) -> Result<(), WorldError> {
        if self.tiles.contains_key(&tile.id) {
            return Err(WorldError::DuplicateTileId(tile.id));
        }
        self.tiles.insert(tile.id, tile);
        Ok(())
    }

    /// Properties for `id`, or the conservative fallback if unregistered.
    pub fn get(&self, id: TileId) -> TileType {
        match self.tiles.get(&id) {
            Some(t) => *t,
            None => {
                log::warn!("unregistered tile id {id}, using solid fallback");
                TileType::fallback(id)
            }
        }
    }

    pub fn is_registered(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The reference tile table: 12 terrain types and 8 special-behavior
    /// types, matching the ids exported from [`crate::types`].
    pub fn standard() -> Self {
        let mut cat = Self::new();
        let terrain = [
            TileType::empty(AIR),
            TileType::solid(GRASS),
            TileType::solid(DIRT),
            TileType::solid(STONE),
            TileType {
                friction: 0.85,
                ..TileType::solid(SAND)
            },
            TileType::solid(ROCK),
            TileType::solid(WALL),
            TileType::solid(WOOD),
            TileType {
                collision: false,
                ..TileType::solid(LEAVES)
            },
            TileType {
                friction: 0.75,
                ..TileType::solid(SNOW)
            },
            TileType::solid(GRAVEL),
            TileType {
                bounce: 0.2,
                ..TileType::solid(METAL)
            },
        ];
        let special = [
            TileType {
                liquid: true,
                viscosity: 0.8,
                behavior: TileBehavior::Water,
                ..TileType::empty(WATER)
            },
            TileType {
                liquid: true,
                viscosity: 0.95,
                damage: 5,
                behavior: TileBehavior::Lava,
                ..TileType::empty(LAVA)
            },
            TileType {
                friction: 0.05,
                behavior: TileBehavior::Ice,
                ..TileType::solid(ICE)
            },
            TileType {
                damage: 10,
                behavior: TileBehavior::Spike,
                ..TileType::solid(SPIKES)
            },
            TileType {
                behavior: TileBehavior::Spring,
                ..TileType::solid(SPRING)
            },
            TileType {
                behavior: TileBehavior::Conveyor(ConveyorDir::Left),
                ..TileType::solid(CONVEYOR_LEFT)
            },
            TileType {
                behavior: TileBehavior::Conveyor(ConveyorDir::Right),
                ..TileType::solid(CONVEYOR_RIGHT)
            },
            TileType {
                behavior: TileBehavior::Breakable,
                ..TileType::solid(BRICK)
            },
        ];
        for t in terrain.into_iter().chain(special) {
            // Ids in the two tables are distinct by construction.
            cat.register(t).expect("standard table has unique ids");
        }
        cat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_duplicates() {
        let mut cat = TileCatalog::new();
        cat.register(TileType::solid(7)).unwrap();
        assert_eq!(
            cat.register(TileType::empty(7)),
            Err(WorldError::DuplicateTileId(7))
        );
        // Original registration untouched
        assert!(cat.get(7).collision);
    }

    #[test]
    fn test_unknown_id_falls_back_to_solid() {
        let cat = TileCatalog::standard();
        let t = cat.get(999);
        assert!(t.collision);
        assert_eq!(t.friction, 1.0);
        assert_eq!(t.behavior, TileBehavior::None);
        assert!(!cat.is_registered(999));
    }

    #[test]
    fn test_standard_table_shape() {
        let cat = TileCatalog::standard();
        assert_eq!(cat.len(), 20);
        assert!(!cat.get(AIR).collision);
        assert!(cat.get(WATER).liquid);
        assert_eq!(cat.get(SPIKES).behavior, TileBehavior::Spike);
        assert_eq!(
            cat.get(CONVEYOR_LEFT).behavior,
            TileBehavior::Conveyor(ConveyorDir::Left)
        );
    }
}
