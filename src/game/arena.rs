//! Arena
//!
//! The simulation context: both combatants, the static terrain, the
//! projectile pool, the clock and the match timer. Nothing lives in a
//! global; a host owns an [`Arena`] and calls [`Arena::step`] once per
//! frame with each combatant's input and the real elapsed time.
//!
//! One step runs, in order:
//! 1. clock tick and time-rate adjustment
//! 2. controller input for each combatant
//! 3. lock-on, force integration, weapon charge and view follow
//! 4. contact passes for combatant 0 then 1 (ground, opponent, walls)
//! 5. position commit for both
//! 6. projectile update, then projectile hits on terrain and combatants
//! 7. match timer, reset and terminate

use serde::Serialize;

use crate::input::{Action, InputProvider};
use crate::physics::{Bullet, RoboId, Vector3};
use crate::world::{FrameClock, Geometry, Ground, MatchTimer, Model, ModelDatabase, RenderSink, Wall};

use super::config::{Tuning, TuningError};
use super::robo::{Robo, WeaponState};
use super::systems::{Armoury, COMBATANTS, CollisionSystem};

pub const ROBO_PROTOTYPE: &str = "robo";
pub const WALL_PROTOTYPE: &str = "wall";
pub const BULLET_PROTOTYPE: &str = "bullet";

/// What happened during one [`Arena::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Scaled time step used by the simulation
    pub delta_ms: u32,
    /// Successful shots per combatant
    pub shots: [usize; COMBATANTS],
    /// Hits taken per combatant
    pub hits: [usize; COMBATANTS],
    /// Projectiles stopped by the ground or a wall
    pub terrain_hits: usize,
    pub reset: bool,
    pub terminate: bool,
    pub match_over: bool,
}

/// HUD-facing snapshot of one combatant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoboStatus {
    pub id: RoboId,
    pub position: Vector3,
    pub heading: f64,
    pub hp: f64,
    pub energy: f64,
    pub lock_on_rate: f64,
    pub is_locking_on: bool,
    pub weapon: WeaponState,
}

impl RoboStatus {
    fn of(robo: &Robo) -> Self {
        Self {
            id: robo.id(),
            position: robo.center(),
            heading: robo.angle_zx(),
            hp: robo.hp(),
            energy: robo.energy(),
            lock_on_rate: robo.lock_on_rate(),
            is_locking_on: robo.is_locking_on(),
            weapon: robo.weapon_state(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArenaStatus {
    pub frame: u64,
    pub remaining_ms: u32,
    pub rate: f64,
    pub robos: [RoboStatus; COMBATANTS],
    pub bullets_in_flight: usize,
    pub match_over: bool,
    /// Combatant with more hit points once the match is over
    pub winner: Option<RoboId>,
}

pub struct Arena {
    tuning: Tuning,

    // === Time ===
    clock: FrameClock,
    timer: MatchTimer,
    frame: u64,

    // === World ===
    models: ModelDatabase,
    ground: Ground,
    walls: Vec<Wall>,

    // === Combatants ===
    robos: [Robo; COMBATANTS],
    armoury: Armoury,

    finished: bool,
}

impl Arena {
    /// Arena with the built-in box prototypes.
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        let mut models = ModelDatabase::new();
        models.register(ROBO_PROTOTYPE, Geometry::cuboid(tuning.robo.half_extents()));
        models.register(WALL_PROTOTYPE, Geometry::cuboid(tuning.layout.wall_half_extents));
        models.register(BULLET_PROTOTYPE, Geometry::cuboid(Vector3::splat(0.5)));
        Self::with_models(tuning, models)
    }

    /// Arena built from host-supplied prototypes named [`ROBO_PROTOTYPE`],
    /// [`WALL_PROTOTYPE`] and [`BULLET_PROTOTYPE`].
    pub fn with_models(tuning: Tuning, models: ModelDatabase) -> Result<Self, TuningError> {
        tuning.validate()?;

        let create = |name: &str, prototype: &str| -> Result<Model, TuningError> {
            models
                .create(name, prototype)
                .ok_or_else(|| TuningError::Invalid(format!("missing model prototype `{prototype}`")))
        };

        let robos = [
            Robo::new(RoboId(0), create("robo0", ROBO_PROTOTYPE)?, tuning.robo, tuning.view),
            Robo::new(RoboId(1), create("robo1", ROBO_PROTOTYPE)?, tuning.robo, tuning.view),
        ];
        let walls = vec![Wall::new(create("wall0", WALL_PROTOTYPE)?)];
        let armoury = Armoury::new(tuning.armoury, tuning.bullet, create("bullet", BULLET_PROTOTYPE)?);

        let mut arena = Self {
            clock: FrameClock::new(tuning.environment.gravity),
            timer: MatchTimer::new(tuning.environment.match_length_ms),
            frame: 0,
            ground: Ground::new(tuning.layout.ground_half_extent),
            models,
            walls,
            robos,
            armoury,
            finished: false,
            tuning,
        };
        arena.place();
        Ok(arena)
    }

    fn place(&mut self) {
        let layout = self.tuning.layout;
        for (robo, (&spawn, &heading)) in self
            .robos
            .iter_mut()
            .zip(layout.spawns.iter().zip(layout.headings.iter()))
        {
            robo.respawn(spawn, heading);
        }
        for wall in &mut self.walls {
            wall.warp(layout.wall_position);
        }
    }

    /// Restore the initial layout, refill the timer and clear every
    /// projectile. The time rate is kept.
    pub fn reset(&mut self) {
        self.place();
        self.armoury.clear();
        self.timer.reset();
        self.finished = false;
        tracing::info!(frame = self.frame, "arena reset");
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn timer(&self) -> &MatchTimer {
        &self.timer
    }

    pub fn models(&self) -> &ModelDatabase {
        &self.models
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn robos(&self) -> &[Robo] {
        &self.robos
    }

    pub fn robo(&self, id: RoboId) -> Option<&Robo> {
        self.robos.get(id.0)
    }

    /// Direct access for hosts that script a scenario.
    pub fn robo_mut(&mut self, id: RoboId) -> Option<&mut Robo> {
        self.robos.get_mut(id.0)
    }

    pub fn armoury(&self) -> &Armoury {
        &self.armoury
    }

    pub fn bullets(&self) -> &[Bullet] {
        self.armoury.bullets()
    }

    pub fn is_match_over(&self) -> bool {
        self.timer.is_over() || self.robos.iter().any(|r| !r.is_alive())
    }

    /// Leader by hit points, `None` on a tie.
    pub fn leader(&self) -> Option<RoboId> {
        let [a, b] = &self.robos;
        if a.hp() > b.hp() {
            Some(a.id())
        } else if b.hp() > a.hp() {
            Some(b.id())
        } else {
            None
        }
    }

    pub fn status(&self) -> ArenaStatus {
        let match_over = self.is_match_over();
        ArenaStatus {
            frame: self.frame,
            remaining_ms: self.timer.remaining_ms(),
            rate: self.clock.rate(),
            robos: [RoboStatus::of(&self.robos[0]), RoboStatus::of(&self.robos[1])],
            bullets_in_flight: self.armoury.owned_count(),
            match_over,
            winner: if match_over { self.leader() } else { None },
        }
    }

    // ========================================================================
    // STEP
    // ========================================================================

    /// Advance the whole arena by one frame of `elapsed_ms` real time.
    pub fn step(&mut self, inputs: [&dyn InputProvider; COMBATANTS], elapsed_ms: u32) -> FrameReport {
        self.frame += 1;
        let dt = self.clock.tick(elapsed_ms);
        self.adjust_rate(&inputs);

        let mut report = FrameReport {
            frame: self.frame,
            delta_ms: dt,
            ..FrameReport::default()
        };

        if !self.is_match_over() {
            self.simulate(&inputs, dt, &mut report);
        }

        if inputs.iter().any(|input| input.is_triggered(Action::Reset)) {
            self.reset();
            report.reset = true;
        }
        report.terminate = inputs.iter().any(|input| input.is_triggered(Action::Terminate));
        report.match_over = self.is_match_over();

        if report.match_over && !self.finished {
            self.finished = true;
            tracing::info!(
                frame = self.frame,
                winner = ?self.leader().map(|id| id.0),
                remaining_ms = self.timer.remaining_ms(),
                "match finished"
            );
        }

        report
    }

    fn adjust_rate(&mut self, inputs: &[&dyn InputProvider]) {
        let env = self.tuning.environment;
        let mut rate = self.clock.rate();
        for input in inputs {
            if input.is_triggered(Action::SpeedUp) {
                rate += env.rate_step;
            }
            if input.is_triggered(Action::SlowDown) {
                rate -= env.rate_step;
            }
        }
        self.clock.set_rate(rate.max(env.min_rate));
    }

    fn simulate(&mut self, inputs: &[&dyn InputProvider], dt: u32, report: &mut FrameReport) {
        let gravity = self.clock.gravity();

        let centers = self.centers();
        let targets = |id: RoboId| centers.get(id.0).copied();
        for (i, input) in inputs.iter().enumerate() {
            report.shots[i] = usize::from(self.apply_controls(i, *input, dt, &targets));
        }

        for (i, robo) in self.robos.iter_mut().enumerate() {
            robo.update(Some(centers[opponent_of(i)]), dt, gravity);
        }

        let shape = self.tuning.collision.robo_contact;
        for i in 0..COMBATANTS {
            let (robo, opponent) = pair_mut(&mut self.robos, i);
            CollisionSystem::resolve(robo, opponent, &self.ground, &self.walls, shape);
        }
        for robo in &mut self.robos {
            robo.commit_next_position();
        }

        let centers = self.centers();
        let targets = |id: RoboId| centers.get(id.0).copied();
        self.armoury.update(dt, gravity, &targets);

        report.terrain_hits = CollisionSystem::burn_terrain(&mut self.armoury, &self.ground, &self.walls);
        for (i, robo) in self.robos.iter_mut().enumerate() {
            report.hits[i] = CollisionSystem::burn_robo(&mut self.armoury, robo);
        }

        self.timer.tick(dt);
    }

    fn centers(&self) -> [Vector3; COMBATANTS] {
        [self.robos[0].center(), self.robos[1].center()]
    }

    /// Translate held actions into forces, shots and camera moves.
    /// Returns whether a shot left the armoury.
    fn apply_controls(
        &mut self,
        index: usize,
        input: &dyn InputProvider,
        dt: u32,
        targets: &impl Fn(RoboId) -> Option<Vector3>,
    ) -> bool {
        let robo = &mut self.robos[index];

        let mut direction = Vector3::ZERO;
        if input.is_on(Action::MoveForward) {
            direction.z += 1.0;
        }
        if input.is_on(Action::MoveBack) {
            direction.z -= 1.0;
        }
        if input.is_on(Action::MoveLeft) {
            direction.x += 1.0;
        }
        if input.is_on(Action::MoveRight) {
            direction.x -= 1.0;
        }

        if direction != Vector3::ZERO {
            robo.run(direction);
        }
        if input.is_on(Action::Boost) {
            robo.boost(direction, dt);
        } else {
            robo.absorb_energy(dt);
        }

        if input.is_on(Action::TurnLeft) {
            robo.rotate_zx(1);
        }
        if input.is_on(Action::TurnRight) {
            robo.rotate_zx(-1);
        }

        let mut look = Vector3::ZERO;
        if input.is_on(Action::LookUp) {
            look.x -= 1.0;
        }
        if input.is_on(Action::LookDown) {
            look.x += 1.0;
        }
        if input.is_on(Action::LookLeft) {
            look.y += 1.0;
        }
        if input.is_on(Action::LookRight) {
            look.y -= 1.0;
        }
        if look != Vector3::ZERO {
            robo.view_mut().rotate(look, dt);
        }
        if input.is_on(Action::ZoomIn) {
            robo.view_mut().narrow(dt);
        }
        if input.is_on(Action::ZoomOut) {
            robo.view_mut().widen(dt);
        }

        if input.is_on(Action::Fire) {
            let opponent = RoboId(opponent_of(index));
            return robo.fire_bullet(&mut self.armoury, Some(opponent), targets);
        }
        false
    }

    // ========================================================================
    // DRAW
    // ========================================================================

    /// Draw the arena as seen by `viewer`.
    pub fn draw(&self, viewer: RoboId, sink: &mut dyn RenderSink) {
        let Some(eye) = self.robo(viewer) else {
            return;
        };
        let projection = eye.view().perspective_matrix();

        self.ground.draw(&projection, sink);
        for wall in &self.walls {
            wall.draw(&projection, sink);
        }
        for robo in &self.robos {
            robo.draw(&projection, sink);
        }
        self.armoury.draw(&projection, sink);
    }
}

fn opponent_of(index: usize) -> usize {
    (index + 1) % COMBATANTS
}

fn pair_mut(robos: &mut [Robo; COMBATANTS], index: usize) -> (&mut Robo, &Robo) {
    let (left, right) = robos.split_at_mut(1);
    if index == 0 {
        (&mut left[0], &right[0])
    } else {
        (&mut right[0], &left[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ActionState;
    use crate::world::FrameRecorder;

    fn idle() -> ActionState {
        ActionState::new()
    }

    #[test]
    fn test_initial_layout() {
        let arena = Arena::new(Tuning::default()).unwrap();
        assert_eq!(arena.robos()[0].center(), Vector3::new(0.0, 10.0, -1.0));
        assert_eq!(arena.robos()[1].center(), Vector3::new(0.0, 10.0, -20.0));
        assert!((arena.robos()[0].angle_zx() - 180.0).abs() < 1e-9);
        assert_eq!(arena.walls()[0].position(), Vector3::new(0.0, 1.2, -15.0));
        assert_eq!(arena.armoury().capacity(), 2000);
    }

    #[test]
    fn test_missing_prototype_is_rejected() {
        let mut models = ModelDatabase::new();
        models.register(ROBO_PROTOTYPE, Geometry::cuboid(Vector3::splat(0.5)));
        let result = Arena::with_models(Tuning::default(), models);
        assert!(matches!(result, Err(TuningError::Invalid(_))));
    }

    #[test]
    fn test_combatants_fall_and_land() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let (a, b) = (idle(), idle());
        for _ in 0..300 {
            arena.step([&a, &b], 16);
        }
        for robo in arena.robos() {
            let y = robo.center().y;
            assert!(y >= 0.5 && y < 0.52, "resting height {y}");
        }
    }

    #[test]
    fn test_rate_keys_change_delta() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let slow = ActionState::pressed(&[Action::SlowDown]);
        let report = arena.step([&slow, &idle()], 100);
        assert_eq!(report.delta_ms, 100);
        assert!((arena.clock().rate() - 0.9).abs() < 1e-12);

        let report = arena.step([&idle(), &idle()], 100);
        assert_eq!(report.delta_ms, 90);
    }

    #[test]
    fn test_rate_never_drops_below_minimum() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let slow = ActionState::pressed(&[Action::SlowDown]);
        for _ in 0..20 {
            arena.step([&slow, &idle()], 16);
        }
        assert!((arena.clock().rate() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_fire_spends_weapon_charge() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let fire = ActionState::pressed(&[Action::Fire]);
        let report = arena.step([&fire, &idle()], 16);
        assert_eq!(report.shots, [1, 0]);
        assert_eq!(arena.robos()[0].weapon_state(), WeaponState::Charging);

        let report = arena.step([&fire, &idle()], 16);
        assert_eq!(report.shots, [0, 0]);
        assert_eq!(arena.armoury().owned_by(RoboId(0)), 1);
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let fire = ActionState::pressed(&[Action::Fire]);
        for _ in 0..10 {
            arena.step([&fire, &idle()], 16);
        }
        let reset = ActionState::pressed(&[Action::Reset]);
        let report = arena.step([&reset, &idle()], 16);

        assert!(report.reset);
        assert_eq!(arena.armoury().owned_count(), 0);
        assert_eq!(arena.robos()[0].center(), Vector3::new(0.0, 10.0, -1.0));
        assert_eq!(arena.timer().remaining_ms(), 99_000);
    }

    #[test]
    fn test_timer_ends_match() {
        let mut tuning = Tuning::default();
        tuning.environment.match_length_ms = 100;
        let mut arena = Arena::new(tuning).unwrap();

        let mut report = FrameReport::default();
        for _ in 0..7 {
            report = arena.step([&idle(), &idle()], 16);
        }
        assert!(report.match_over);
        assert!(arena.status().match_over);
        assert_eq!(arena.status().winner, None);

        let frozen = arena.robos()[0].center();
        arena.step([&idle(), &idle()], 16);
        assert_eq!(arena.robos()[0].center(), frozen);
    }

    #[test]
    fn test_terminate_is_reported() {
        let mut arena = Arena::new(Tuning::default()).unwrap();
        let quit = ActionState::pressed(&[Action::Terminate]);
        assert!(arena.step([&idle(), &quit], 16).terminate);
    }

    #[test]
    fn test_draw_submits_every_model() {
        let arena = Arena::new(Tuning::default()).unwrap();
        let mut recorder = FrameRecorder::new();
        arena.draw(RoboId(0), &mut recorder);
        // ground, wall, two combatants
        assert_eq!(recorder.batches().len(), 4);
    }
}
