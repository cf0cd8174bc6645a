/// Simple positioned objects drawn through the flat-shaded path.
///
/// Each entity carries an optional model (drawn translated by its position)
/// and a `Behavior` that moves it every `update`.
use crate::error::RenderResult;
use crate::meshing::Mesh;
use crate::rendering::{DrawStats, DrawSurface, Renderer};
use glam::Vec3;
use std::f32::consts::TAU;

/// Edge length of the cube drawn for entities without a model.
pub const FALLBACK_CUBE_SIZE: f32 = 20.0;

/// Default entity color
pub const DEFAULT_ENTITY_COLOR: u32 = 0xFFFF_5555;

/// Something advanced once per frame by a time step in seconds.
pub trait Updatable {
    fn update(&mut self, position: &mut Vec3, dt: f32);
}

/// Per-frame motion of an entity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Behavior {
    #[default]
    Static,
    /// Constant velocity, units per second
    Drift { velocity: Vec3 },
    /// Circle in the x/z plane around `center`
    Orbit {
        center: Vec3,
        radius: f32,
        /// Radians per second
        angular_speed: f32,
        /// Current angle, radians
        phase: f32,
    },
    /// Vertical sine oscillation around `base_y`
    Bob {
        amplitude: f32,
        /// Cycles per second
        frequency: f32,
        base_y: f32,
        /// Accumulated time, seconds
        time: f32,
    },
}

impl Updatable for Behavior {
    fn update(&mut self, position: &mut Vec3, dt: f32) {
        match self {
            Behavior::Static => {}
            Behavior::Drift { velocity } => *position += *velocity * dt,
            Behavior::Orbit {
                center,
                radius,
                angular_speed,
                phase,
            } => {
                *phase = (*phase + *angular_speed * dt).rem_euclid(TAU);
                let (sin, cos) = phase.sin_cos();
                *position = *center + Vec3::new(cos * *radius, 0.0, sin * *radius);
            }
            Behavior::Bob {
                amplitude,
                frequency,
                base_y,
                time,
            } => {
                *time += dt;
                position.y = *base_y + *amplitude * (*time * *frequency * TAU).sin();
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Construction parameters for `Entities::add`.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDesc {
    pub position: Vec3,
    pub color: u32,
    pub model: Option<Mesh>,
    pub behavior: Behavior,
}

impl Default for EntityDesc {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: DEFAULT_ENTITY_COLOR,
            model: None,
            behavior: Behavior::Static,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec3,
    pub color: u32,
    pub model: Option<Mesh>,
    pub behavior: Behavior,
}

impl Entity {
    /// Model moved to the entity's position, or the fallback cube.
    pub fn world_mesh(&self) -> Mesh {
        match &self.model {
            Some(model) => model.translated(self.position),
            None => Mesh::cube(self.position, FALLBACK_CUBE_SIZE),
        }
    }
}

/// Entity collection. Ids are sequential and never reused.
#[derive(Debug, Default)]
pub struct Entities {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, desc: EntityDesc) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            position: desc.position,
            color: desc.color,
            model: desc.model,
            behavior: desc.behavior,
        });
        id
    }

    /// Returns false if no entity had this id.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|entity| entity.id != id);
        self.entities.len() != before
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Run every entity's behavior for a step of `dt` seconds.
    /// Non-finite steps are ignored.
    pub fn update(&mut self, dt: f32) {
        if !dt.is_finite() {
            log::debug!("ignoring non-finite entity time step {dt}");
            return;
        }
        for entity in &mut self.entities {
            entity.behavior.update(&mut entity.position, dt);
        }
    }

    /// Draw every entity in insertion order.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        renderer: &mut Renderer,
        surface: &mut S,
    ) -> RenderResult<DrawStats> {
        let mut stats = DrawStats::default();
        for entity in &self.entities {
            stats += renderer.draw_solid(&entity.world_mesh(), entity.color, surface)?;
        }
        Ok(stats)
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
