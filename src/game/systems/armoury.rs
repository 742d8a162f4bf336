//! Armoury - the projectile pool.
//!
//! Owns a fixed array of [`Bullet`] slots sized for both combatants and is
//! the only thing that mutates them. Firing is refused once a combatant
//! already owns its quota of slots; nothing is allocated per shot.

use serde::{Deserialize, Serialize};

use crate::game::robo::Robo;
use crate::physics::{Bullet, BulletConfig, HomingTarget, Launch, Matrix44, RoboId, TriangleSource};
use crate::world::{Model, RenderSink};

/// Slots each combatant may hold at once unless tuned otherwise.
pub const DEFAULT_QUOTA: usize = 1000;

/// Combatants sharing one pool.
pub const COMBATANTS: usize = 2;

static_assertions::const_assert!(DEFAULT_QUOTA > 0);
static_assertions::const_assert!(DEFAULT_QUOTA * COMBATANTS <= 2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmouryConfig {
    /// Concurrently owned slots per combatant
    pub quota: usize,
}

impl Default for ArmouryConfig {
    fn default() -> Self {
        Self {
            quota: DEFAULT_QUOTA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Armoury {
    bullets: Box<[Bullet]>,
    quota: usize,
    bullet: BulletConfig,
    model: Model,
}

impl Armoury {
    /// Allocate `COMBATANTS * quota` unowned slots. `model` is drawn once
    /// per owned slot.
    pub fn new(config: ArmouryConfig, bullet: BulletConfig, model: Model) -> Self {
        Self {
            bullets: vec![Bullet::default(); config.quota * COMBATANTS].into_boxed_slice(),
            quota: config.quota,
            bullet,
            model,
        }
    }

    pub fn capacity(&self) -> usize {
        self.bullets.len()
    }

    pub fn quota(&self) -> usize {
        self.quota
    }

    pub fn bullet_config(&self) -> &BulletConfig {
        &self.bullet
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn owned_count(&self) -> usize {
        self.bullets.iter().filter(|b| b.is_owned()).count()
    }

    pub fn owned_by(&self, id: RoboId) -> usize {
        self.bullets.iter().filter(|b| b.is_owned_by(id)).count()
    }

    /// Claim the first free slot for `launch`.
    ///
    /// Returns `false` without touching the pool when the owner is at quota
    /// or no slot is free.
    pub fn fire(&mut self, launch: &Launch, targets: &impl HomingTarget) -> bool {
        let owned = self.owned_by(launch.owner);
        if owned >= self.quota {
            tracing::debug!(owner = launch.owner.0, owned, quota = self.quota, "fire rejected, quota reached");
            return false;
        }

        match self.bullets.iter_mut().find(|b| !b.is_owned()) {
            Some(slot) => {
                slot.initialize(launch, targets, &self.bullet);
                true
            }
            None => false,
        }
    }

    /// Advance every slot. Free slots ignore the call.
    pub fn update(&mut self, dt_ms: u32, gravity: f64, targets: &impl HomingTarget) {
        for bullet in self.bullets.iter_mut() {
            bullet.update(dt_ms, gravity, targets, &self.bullet);
        }
    }

    /// Test every in-flight bullet against `robo`, skipping its own shots.
    /// Each hit stops the bullet and damages the combatant. Returns the
    /// number of hits.
    pub fn make_collision_with_robo(&mut self, robo: &mut Robo) -> usize {
        let id = robo.id();
        let locus = robo.locus_cuboid();
        let triangles = robo.triangles();
        let damage = self.bullet.damage;

        let mut hits = 0;
        for bullet in self.bullets.iter_mut() {
            if !bullet.is_owned() || bullet.did_collide() || bullet.is_owned_by(id) {
                continue;
            }
            if !bullet.locus_cuboid(&self.bullet).does_intersect(&locus) {
                continue;
            }
            if let Some(point) = bullet.locus_segment().first_hit(&triangles) {
                bullet.burn_at(point);
                robo.was_shot(damage);
                hits += 1;
                tracing::debug!(
                    owner = ?bullet.owner().map(|o| o.0),
                    target_id = id.0,
                    hp = robo.hp(),
                    "bullet hit combatant"
                );
            }
        }
        hits
    }

    /// Test every in-flight bullet against static geometry. Returns the
    /// number of bullets stopped.
    pub fn make_collision_with_terrain(&mut self, terrain: &(impl TriangleSource + ?Sized)) -> usize {
        let mut hits = 0;
        for bullet in self.bullets.iter_mut() {
            if !bullet.is_owned() || bullet.did_collide() {
                continue;
            }
            if let Some(point) = bullet.locus_segment().first_hit(terrain) {
                bullet.burn_at(point);
                hits += 1;
                tracing::debug!(owner = ?bullet.owner().map(|o| o.0), "bullet hit terrain");
            }
        }
        hits
    }

    /// Release every slot.
    pub fn clear(&mut self) {
        self.bullets.fill(Bullet::default());
    }

    /// Draw every owned slot, collided ones at their hit point.
    pub fn draw(&self, projection: &Matrix44, sink: &mut dyn RenderSink) {
        let mut model = self.model.clone();
        model.scale = self.bullet.draw_scale;
        for bullet in self.bullets.iter().filter(|b| b.is_owned()) {
            model.position = bullet.position();
            model.angle = bullet.orientation();
            model.draw(projection, sink);
        }
    }
}
