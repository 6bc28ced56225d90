//! One integrator for every decorative particle effect.
//!
//! Confetti, petals, bubbles, sparkles and page-transition trails only differ
//! in how particles are spawned and which forces act on them. Both live in a
//! [`ParticleProfile`]; the simulator itself is shared.

use std::f32::consts::TAU;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Shape {
    Heart,
    Star,
    Flower,
    Circle,
    Petal,
    Bubble,
    Sparkle,
    Dot,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Particle {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub scale: f32,
    pub color: &'static str,
    pub shape: Shape,
    /// Horizontal wobble amplitude, zero for ballistic particles.
    pub sway: f32,
    pub remaining_life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.remaining_life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// How far outside the viewport a particle may travel before it is culled.
    pub margin: f32,
}

impl Bounds {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Anywhere,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPolicy {
    /// Random x across the screen, y on the given edge, velocity drawn from the ranges.
    Ambient {
        edge: Edge,
        vx: (f32, f32),
        vy: (f32, f32),
    },
    /// Evenly spaced rays out of the origin, each with a random speed.
    Burst {
        offset: f32,
        speed: (f32, f32),
        lift: f32,
    },
    /// Motionless particles placed on a circle around the origin.
    Ring { radius: f32 },
    /// Uniformly over the viewport, velocity in `[-speed, speed)` per axis.
    Scatter { speed: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleProfile {
    pub name: &'static str,
    pub spawn: SpawnPolicy,
    pub gravity: f32,
    pub air_drag: f32,
    /// Also cull particles that leave through the top (rising effects).
    pub cull_above: bool,
    pub palette: &'static [&'static str],
    pub shapes: &'static [Shape],
    pub life: (f32, f32),
    pub scale: (f32, f32),
    pub rotation_speed: (f32, f32),
    pub sway: (f32, f32),
}

/// Periodically spawns batches while attached to a simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub policy: SpawnPolicy,
    pub batch: usize,
    pub interval: (Duration, Duration),
    next_in: Duration,
}

impl Emitter {
    pub fn new(policy: SpawnPolicy, batch: usize, interval: (Duration, Duration)) -> Self {
        Self {
            policy,
            batch,
            interval,
            next_in: interval.0.max(Duration::from_millis(1)),
        }
    }
}

#[derive(Debug)]
pub struct ParticleSimulator {
    profile: ParticleProfile,
    bounds: Bounds,
    step: Duration,
    particles: Vec<Particle>,
    next_id: u64,
    accumulated: Duration,
    emitter: Option<Emitter>,
    rng: StdRng,
}

impl ParticleSimulator {
    pub fn new(profile: ParticleProfile, bounds: Bounds, step: Duration, rng: StdRng) -> Self {
        Self {
            profile,
            bounds,
            step,
            particles: Vec::new(),
            next_id: 0,
            accumulated: Duration::ZERO,
            emitter: None,
            rng,
        }
    }

    pub fn name(&self) -> &'static str {
        self.profile.name
    }

    pub fn active_particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_emitting(&self) -> bool {
        self.emitter.is_some()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn start_emitter(&mut self, emitter: Emitter) {
        self.emitter = Some(emitter);
    }

    pub fn stop_emitter(&mut self) {
        self.emitter = None;
    }

    /// Spawns `count` particles using the profile's own policy.
    pub fn spawn(&mut self, count: usize, origin: Option<Vec2>) {
        let policy = self.profile.spawn;
        self.spawn_with(policy, count, origin);
    }

    pub fn spawn_with(&mut self, policy: SpawnPolicy, count: usize, origin: Option<Vec2>) {
        let origin = origin.unwrap_or_else(|| self.bounds.center());
        for i in 0..count {
            let particle = self.make_particle(policy, i, count, origin);
            self.particles.push(particle);
        }
    }

    /// Advances wall time by `dt`, running one integration step per elapsed
    /// nominal step and feeding the emitter.
    pub fn tick(&mut self, dt: Duration) {
        self.run_emitter(dt);

        self.accumulated += dt;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            self.step_once();
        }
    }

    /// A single explicit Euler step.
    pub fn step_once(&mut self) {
        let gravity = self.profile.gravity;
        let drag = self.profile.air_drag;
        for p in &mut self.particles {
            p.position.x += p.velocity.x;
            p.position.y += p.velocity.y;
            if p.sway != 0.0 {
                p.position.x += (p.position.y * 0.01).sin() * p.sway;
            }
            p.velocity.y += gravity;
            p.velocity.x *= drag;
            p.rotation += p.rotation_speed;
            p.remaining_life -= 1.0;
        }

        let bounds = self.bounds;
        let cull_above = self.profile.cull_above;
        self.particles.retain(|p| {
            p.remaining_life > 0.0
                && p.position.y <= bounds.height + bounds.margin
                && !(cull_above && p.position.y < -bounds.margin)
        });
    }

    fn run_emitter(&mut self, dt: Duration) {
        let Some(mut emitter) = self.emitter.take() else {
            return;
        };
        let mut left = dt;
        while left >= emitter.next_in {
            left -= emitter.next_in;
            self.spawn_with(emitter.policy, emitter.batch, None);
            emitter.next_in = self.next_interval(emitter.interval);
        }
        emitter.next_in -= left;
        self.emitter = Some(emitter);
    }

    fn next_interval(&mut self, (low, high): (Duration, Duration)) -> Duration {
        if high <= low {
            return low.max(Duration::from_millis(1));
        }
        self.rng.gen_range(low..high).max(Duration::from_millis(1))
    }

    fn make_particle(
        &mut self,
        policy: SpawnPolicy,
        index: usize,
        count: usize,
        origin: Vec2,
    ) -> Particle {
        let (position, velocity) = match policy {
            SpawnPolicy::Ambient { edge, vx, vy } => {
                let x = self.rng.gen::<f32>() * self.bounds.width;
                let y = match edge {
                    Edge::Top => -20.0,
                    Edge::Bottom => self.bounds.height + 20.0,
                    Edge::Anywhere => self.rng.gen::<f32>() * self.bounds.height,
                };
                let velocity = Vec2::new(between(&mut self.rng, vx), between(&mut self.rng, vy));
                (Vec2::new(x, y), velocity)
            }
            SpawnPolicy::Burst {
                offset,
                speed,
                lift,
            } => {
                let angle = index as f32 / count.max(1) as f32 * TAU;
                let speed = between(&mut self.rng, speed);
                let (sin, cos) = angle.sin_cos();
                (
                    Vec2::new(origin.x + cos * offset, origin.y + sin * offset),
                    Vec2::new(cos * speed, sin * speed - lift),
                )
            }
            SpawnPolicy::Ring { radius } => {
                let angle = index as f32 / count.max(1) as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                (
                    Vec2::new(origin.x + cos * radius, origin.y + sin * radius),
                    Vec2::default(),
                )
            }
            SpawnPolicy::Scatter { speed } => {
                let x = self.rng.gen::<f32>() * self.bounds.width;
                let y = self.rng.gen::<f32>() * self.bounds.height;
                let velocity = Vec2::new(
                    between(&mut self.rng, (-speed, speed)),
                    between(&mut self.rng, (-speed, speed)),
                );
                (Vec2::new(x, y), velocity)
            }
        };

        let life = between(&mut self.rng, self.profile.life).max(1.0);
        let particle = Particle {
            id: self.next_id,
            position,
            velocity,
            rotation: self.rng.gen::<f32>() * 360.0,
            rotation_speed: between(&mut self.rng, self.profile.rotation_speed),
            scale: between(&mut self.rng, self.profile.scale),
            color: pick(&mut self.rng, self.profile.palette).unwrap_or("#FFFFFF"),
            shape: pick(&mut self.rng, self.profile.shapes).unwrap_or(Shape::Dot),
            sway: between(&mut self.rng, self.profile.sway),
            remaining_life: life,
            max_life: life,
        };
        self.next_id += 1;
        particle
    }
}

fn between(rng: &mut StdRng, (low, high): (f32, f32)) -> f32 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..high)
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
        margin: 100.0,
    };

    fn profile(spawn: SpawnPolicy) -> ParticleProfile {
        ParticleProfile {
            name: "test",
            spawn,
            gravity: 0.3,
            air_drag: 0.99,
            cull_above: false,
            palette: &["#FFB6C1"],
            shapes: &[Shape::Heart],
            life: (10.0, 10.0),
            scale: (1.0, 1.0),
            rotation_speed: (2.0, 2.0),
            sway: (0.0, 0.0),
        }
    }

    fn simulator(spawn: SpawnPolicy) -> ParticleSimulator {
        ParticleSimulator::new(
            profile(spawn),
            BOUNDS,
            Duration::from_millis(16),
            StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn one_step_integrates_like_euler() {
        let mut sim = simulator(SpawnPolicy::Ring { radius: 0.0 });
        sim.spawn(1, Some(Vec2::new(100.0, 100.0)));
        {
            let p = &mut sim.particles[0];
            p.velocity = Vec2::new(10.0, -4.0);
            p.rotation = 0.0;
        }

        sim.step_once();

        let p = &sim.active_particles()[0];
        assert_eq!(p.position, Vec2::new(110.0, 96.0));
        assert!((p.velocity.x - 9.9).abs() < 1e-5);
        assert!((p.velocity.y - -3.7).abs() < 1e-5);
        assert_eq!(p.rotation, 2.0);
        assert_eq!(p.remaining_life, 9.0);
    }

    #[test]
    fn particles_expire_after_their_life() {
        let mut sim = simulator(SpawnPolicy::Ring { radius: 10.0 });
        sim.spawn(4, None);
        for _ in 0..9 {
            sim.step_once();
        }
        assert_eq!(sim.len(), 4);
        sim.step_once();
        assert!(sim.is_empty());
    }

    #[test]
    fn particles_below_the_viewport_are_culled() {
        let mut sim = simulator(SpawnPolicy::Ring { radius: 0.0 });
        sim.spawn(2, Some(Vec2::new(10.0, 650.0)));
        sim.particles[0].velocity = Vec2::new(0.0, 60.0);
        sim.particles[1].velocity = Vec2::new(0.0, -60.0);

        sim.step_once();
        assert_eq!(sim.len(), 1);
        assert!(sim.active_particles()[0].position.y < 700.0);
    }

    #[test]
    fn rising_profiles_cull_above_the_top() {
        let mut profile = profile(SpawnPolicy::Ring { radius: 0.0 });
        profile.cull_above = true;
        profile.gravity = 0.0;
        let mut sim = ParticleSimulator::new(
            profile,
            BOUNDS,
            Duration::from_millis(16),
            StdRng::seed_from_u64(2),
        );
        sim.spawn(1, Some(Vec2::new(10.0, -95.0)));
        sim.particles[0].velocity = Vec2::new(0.0, -10.0);
        sim.step_once();
        assert!(sim.is_empty());
    }

    #[test]
    fn burst_fans_out_from_the_origin() {
        let mut sim = simulator(SpawnPolicy::Burst {
            offset: 50.0,
            speed: (5.0, 15.0),
            lift: 5.0,
        });
        let center = Vec2::new(400.0, 300.0);
        sim.spawn(4, Some(center));

        for p in sim.active_particles() {
            let dx = p.position.x - center.x;
            let dy = p.position.y - center.y;
            assert!(((dx * dx + dy * dy).sqrt() - 50.0).abs() < 1e-3);
            let speed = (p.velocity.x.powi(2) + (p.velocity.y + 5.0).powi(2)).sqrt();
            assert!(speed > 4.999 && speed < 15.001, "speed {speed}");
        }
        // first ray points right
        assert!((sim.active_particles()[0].position.x - 450.0).abs() < 1e-3);
    }

    #[test]
    fn tick_runs_whole_steps_only() {
        let mut sim = simulator(SpawnPolicy::Ring { radius: 0.0 });
        sim.spawn(1, None);

        sim.tick(Duration::from_millis(40));
        assert_eq!(sim.active_particles()[0].remaining_life, 8.0);
        sim.tick(Duration::from_millis(8));
        assert_eq!(sim.active_particles()[0].remaining_life, 7.0);
    }

    #[test]
    fn emitter_spawns_batches_until_stopped() {
        let mut sim = simulator(SpawnPolicy::Ambient {
            edge: Edge::Top,
            vx: (-4.0, 4.0),
            vy: (2.0, 5.0),
        });
        let interval = Duration::from_millis(200);
        sim.start_emitter(Emitter::new(
            SpawnPolicy::Ambient {
                edge: Edge::Top,
                vx: (-4.0, 4.0),
                vy: (2.0, 5.0),
            },
            3,
            (interval, interval),
        ));

        sim.tick(Duration::from_millis(199));
        assert!(sim.is_empty());
        sim.tick(Duration::from_millis(1));
        assert_eq!(sim.len(), 3);
        assert!(sim.active_particles().iter().all(|p| p.position.y == -20.0));

        sim.stop_emitter();
        sim.tick(Duration::from_millis(400));
        assert!(sim.len() <= 3);
        assert!(!sim.is_emitting());
    }

    #[test]
    fn opacity_follows_remaining_life() {
        let mut sim = simulator(SpawnPolicy::Ring { radius: 0.0 });
        sim.spawn(1, None);
        for _ in 0..5 {
            sim.step_once();
        }
        assert!((sim.active_particles()[0].opacity() - 0.5).abs() < 1e-6);
    }
}
