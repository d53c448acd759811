//! Village World
//!
//! The walkable map, the player, and the interactable objects on it.
//! Screen-style coordinates: one unit per tile, +y points down.

use macroquad::prelude::{vec2, Vec2};

/// How close the player must stand to an interactable to get the prompt.
/// The boundary itself counts as in range.
pub const INTERACTION_RADIUS: f32 = 2.0;

/// Widest angle (degrees) between the facing vector and the direction to a
/// target that still counts as "facing it".
pub const FACING_MAX_ANGLE: f32 = 45.0;

pub const PLAYER_SPEED: f32 = 5.0;

/// Index into [`World::interactables`]; stable for the session.
pub type InteractableId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractableKind {
    Shopkeeper,
    Sign,
}

impl InteractableKind {
    /// Whether interacting opens the buy/sell flow.
    pub fn is_shop(&self) -> bool {
        matches!(self, InteractableKind::Shopkeeper)
    }
}

#[derive(Debug, Clone)]
pub struct Interactable {
    pub name: String,
    pub pos: Vec2,
    pub kind: InteractableKind,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Unit vector, snapped to one of the four cardinal directions.
    pub facing: Vec2,
    pub movement_enabled: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, facing: vec2(0.0, 1.0), movement_enabled: true }
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub interactables: Vec<Interactable>,
    /// Map extent in tiles; the player is kept inside it.
    pub width: f32,
    pub height: f32,
}

impl World {
    /// The demo village: one shopkeeper, one sign.
    pub fn village() -> Self {
        Self {
            player: Player::new(vec2(8.0, 8.5)),
            interactables: vec![
                Interactable {
                    name: "Shopkeeper".to_string(),
                    pos: vec2(8.0, 4.5),
                    kind: InteractableKind::Shopkeeper,
                },
                Interactable {
                    name: "Wooden Sign".to_string(),
                    pos: vec2(12.5, 8.5),
                    kind: InteractableKind::Sign,
                },
            ],
            width: 16.0,
            height: 12.0,
        }
    }

    pub fn interactable(&self, id: InteractableId) -> Option<&Interactable> {
        self.interactables.get(id)
    }

    /// Nearest interactable within [`INTERACTION_RADIUS`]. Ties keep the
    /// first one found.
    pub fn nearest_interactable(&self) -> Option<InteractableId> {
        let mut best: Option<(InteractableId, f32)> = None;
        for (id, obj) in self.interactables.iter().enumerate() {
            let dist = self.player.pos.distance(obj.pos);
            if dist > INTERACTION_RADIUS {
                continue;
            }
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((id, dist)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// True when the angle between the player's facing and the direction to
    /// the target is under [`FACING_MAX_ANGLE`]. Standing exactly on the
    /// target counts as facing it.
    pub fn is_facing(&self, id: InteractableId) -> bool {
        let Some(obj) = self.interactable(id) else {
            return false;
        };
        let to_target = obj.pos - self.player.pos;
        if to_target.length_squared() < f32::EPSILON {
            return true;
        }
        let cos_angle = self.player.facing.normalize().dot(to_target.normalize());
        cos_angle > FACING_MAX_ANGLE.to_radians().cos()
    }

    /// Snap the player's facing toward a position, dominant axis first
    /// (vertical on ties).
    pub fn face_towards(&mut self, target: Vec2) {
        let dir = target - self.player.pos;
        self.player.facing = if dir.x.abs() > dir.y.abs() {
            vec2(dir.x.signum(), 0.0)
        } else if dir.y < 0.0 {
            vec2(0.0, -1.0)
        } else {
            vec2(0.0, 1.0)
        };
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.player.movement_enabled = enabled;
    }

    /// Apply one tick of movement. `axis_y` is +1 for up, matching the
    /// input facade; diagonals are normalized. Facing follows the held axes,
    /// vertical taking precedence.
    pub fn apply_movement(&mut self, dt: f32, axis_x: f32, axis_y: f32) {
        if !self.player.movement_enabled {
            return;
        }
        let dir = vec2(axis_x, -axis_y);
        if dir.length_squared() < f32::EPSILON {
            return;
        }
        self.player.pos += dir.normalize() * PLAYER_SPEED * dt;
        self.player.pos.x = self.player.pos.x.clamp(0.5, self.width - 0.5);
        self.player.pos.y = self.player.pos.y.clamp(0.5, self.height - 0.5);

        self.player.facing = if axis_y > 0.0 {
            vec2(0.0, -1.0)
        } else if axis_y < 0.0 {
            vec2(0.0, 1.0)
        } else {
            vec2(axis_x.signum(), 0.0)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(objs: Vec<(f32, f32, InteractableKind)>) -> World {
        World {
            player: Player::new(vec2(0.0, 0.0)),
            interactables: objs
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, kind))| Interactable {
                    name: format!("obj{}", i),
                    pos: vec2(x, y),
                    kind,
                })
                .collect(),
            width: 32.0,
            height: 32.0,
        }
    }

    #[test]
    fn test_nearest_within_radius() {
        let world = world_with(vec![
            (5.0, 0.0, InteractableKind::Sign),
            (1.5, 0.0, InteractableKind::Shopkeeper),
        ]);
        assert_eq!(world.nearest_interactable(), Some(1));
    }

    #[test]
    fn test_nearest_none_out_of_range() {
        let world = world_with(vec![(2.1, 0.0, InteractableKind::Shopkeeper)]);
        assert_eq!(world.nearest_interactable(), None);
    }

    #[test]
    fn test_boundary_distance_counts_as_in_range() {
        let world = world_with(vec![(2.0, 0.0, InteractableKind::Shopkeeper)]);
        assert_eq!(world.nearest_interactable(), Some(0));
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let world = world_with(vec![
            (1.0, 0.0, InteractableKind::Sign),
            (-1.0, 0.0, InteractableKind::Shopkeeper),
        ]);
        assert_eq!(world.nearest_interactable(), Some(0));
    }

    #[test]
    fn test_facing_within_cone() {
        let mut world = world_with(vec![(2.0, 0.0, InteractableKind::Shopkeeper)]);
        world.player.facing = vec2(1.0, 0.0);
        assert!(world.is_facing(0));

        world.player.facing = vec2(0.0, 1.0);
        assert!(!world.is_facing(0));
    }

    #[test]
    fn test_facing_cone_boundary() {
        let mut world = world_with(vec![
            (1.0, 0.9, InteractableKind::Shopkeeper),
            (1.0, 1.1, InteractableKind::Sign),
        ]);
        world.player.facing = vec2(1.0, 0.0);
        // ~42 degrees off axis: still inside the cone
        assert!(world.is_facing(0));
        // ~48 degrees: outside
        assert!(!world.is_facing(1));
    }

    #[test]
    fn test_face_towards_dominant_axis() {
        let mut world = world_with(vec![]);
        world.face_towards(vec2(3.0, 1.0));
        assert_eq!(world.player.facing, vec2(1.0, 0.0));

        world.face_towards(vec2(1.0, -3.0));
        assert_eq!(world.player.facing, vec2(0.0, -1.0));

        // Tie goes to vertical
        world.face_towards(vec2(2.0, 2.0));
        assert_eq!(world.player.facing, vec2(0.0, 1.0));
    }

    #[test]
    fn test_movement_disabled_freezes_player() {
        let mut world = world_with(vec![]);
        world.set_movement_enabled(false);
        world.apply_movement(0.1, 1.0, 0.0);
        assert_eq!(world.player.pos, vec2(0.0, 0.0));
    }

    #[test]
    fn test_movement_updates_facing_vertical_priority() {
        let mut world = World::village();
        world.apply_movement(0.1, 1.0, 1.0);
        assert_eq!(world.player.facing, vec2(0.0, -1.0));

        world.apply_movement(0.1, -1.0, 0.0);
        assert_eq!(world.player.facing, vec2(-1.0, 0.0));
    }

    #[test]
    fn test_movement_clamped_to_bounds() {
        let mut world = World::village();
        for _ in 0..200 {
            world.apply_movement(0.5, 1.0, 0.0);
        }
        assert!(world.player.pos.x <= world.width - 0.5);
    }
}
