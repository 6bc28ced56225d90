pub mod particle;
pub mod presets;

use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
pub use particle::{
    Bounds, Emitter, Particle, ParticleProfile, ParticleSimulator, Shape, SpawnPolicy, Vec2,
};

const CULL_MARGIN: f32 = 100.0;

/// Every decorative layer the quiz shows. Purely visual: nothing in here
/// feeds back into the quiz.
#[derive(Debug)]
pub struct Effects {
    pub petals: ParticleSimulator,
    pub bubbles: ParticleSimulator,
    pub sparkles: ParticleSimulator,
    pub trail: ParticleSimulator,
    pub reveal: ParticleSimulator,
    pub confetti: ParticleSimulator,
}

impl Effects {
    pub fn new(config: &Config, rng: &mut StdRng) -> Self {
        let bounds = Bounds {
            width: config.viewport_width,
            height: config.viewport_height,
            margin: CULL_MARGIN,
        };
        let mut layer = |profile: ParticleProfile| {
            ParticleSimulator::new(profile, bounds, config.tick, StdRng::seed_from_u64(rng.gen()))
        };

        let mut effects = Self {
            petals: layer(presets::petals()),
            bubbles: layer(presets::bubbles()),
            sparkles: layer(presets::sparkles()),
            trail: layer(presets::transition_trail()),
            reveal: layer(presets::sparkle_reveal()),
            confetti: layer(presets::confetti()),
        };

        effects
            .petals
            .spawn_with(presets::petal_seed(), presets::INITIAL_PETALS, None);
        effects.petals.start_emitter(presets::petal_drift());
        effects.bubbles.start_emitter(presets::bubble_rise());
        effects.sparkles.start_emitter(presets::sparkle_twinkle());
        effects
    }

    pub fn layers(&self) -> [&ParticleSimulator; 6] {
        [
            &self.petals,
            &self.bubbles,
            &self.sparkles,
            &self.trail,
            &self.reveal,
            &self.confetti,
        ]
    }

    fn layers_mut(&mut self) -> [&mut ParticleSimulator; 6] {
        [
            &mut self.petals,
            &mut self.bubbles,
            &mut self.sparkles,
            &mut self.trail,
            &mut self.reveal,
            &mut self.confetti,
        ]
    }

    pub fn tick(&mut self, dt: Duration) {
        for layer in self.layers_mut() {
            layer.tick(dt);
        }
    }

    pub fn particle_count(&self) -> usize {
        self.layers().iter().map(|layer| layer.len()).sum()
    }

    pub fn page_changed(&mut self) {
        self.trail.clear();
        self.trail.spawn(presets::TRAIL_COUNT, None);
        debug!("Transition trail with {} particles", self.trail.len());
    }

    pub fn reveal_question(&mut self) {
        self.reveal.spawn(presets::REVEAL_COUNT, None);
    }

    /// Radial burst from the middle of the screen plus a stream from the top.
    pub fn celebrate(&mut self) {
        self.confetti.clear();
        self.confetti.spawn(presets::CONFETTI_BURST, None);
        self.confetti.start_emitter(presets::confetti_stream());
        debug!("Confetti burst with {} pieces", self.confetti.len());
    }

    /// Stops feeding confetti; pieces already in the air keep falling.
    pub fn stop_confetti_stream(&mut self) {
        self.confetti.stop_emitter();
    }

    pub fn clear_confetti(&mut self) {
        self.confetti.stop_emitter();
        self.confetti.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects() -> Effects {
        let mut rng = StdRng::seed_from_u64(5);
        Effects::new(&Config::default(), &mut rng)
    }

    #[test]
    fn ambient_layers_start_running() {
        let effects = effects();
        assert_eq!(effects.petals.len(), presets::INITIAL_PETALS);
        assert!(effects.petals.is_emitting());
        assert!(effects.bubbles.is_emitting());
        assert!(effects.sparkles.is_emitting());
        assert!(effects.confetti.is_empty());
        assert!(!effects.confetti.is_emitting());
        assert_eq!(effects.particle_count(), presets::INITIAL_PETALS);
    }

    #[test]
    fn celebration_streams_until_stopped() {
        let mut effects = effects();
        effects.celebrate();
        assert_eq!(effects.confetti.len(), presets::CONFETTI_BURST);

        effects.tick(Duration::from_millis(200));
        assert_eq!(
            effects.confetti.len(),
            presets::CONFETTI_BURST + presets::CONFETTI_STREAM_BATCH
        );

        effects.stop_confetti_stream();
        let before = effects.confetti.len();
        effects.tick(Duration::from_millis(200));
        assert!(effects.confetti.len() <= before);

        effects.clear_confetti();
        assert!(effects.confetti.is_empty());
    }

    fn heights(layer: &ParticleSimulator) -> Vec<(u64, f32)> {
        layer
            .active_particles()
            .iter()
            .map(|p| (p.id, p.position.y))
            .collect()
    }

    fn height_before(heights: &[(u64, f32)], id: u64) -> f32 {
        heights.iter().find(|(i, _)| *i == id).map(|(_, y)| *y).unwrap()
    }

    #[test]
    fn ambient_layers_drift_slowly() {
        let mut effects = effects();
        effects.bubbles.spawn(5, None);
        let petals = heights(&effects.petals);
        let bubbles = heights(&effects.bubbles);

        // 50 steps of 16ms, before either emitter fires
        effects.tick(Duration::from_millis(50 * 16));
        assert_eq!(effects.petals.len(), presets::INITIAL_PETALS);
        assert_eq!(effects.bubbles.len(), 5);

        for p in effects.petals.active_particles() {
            let fallen = p.position.y - height_before(&petals, p.id);
            assert!(fallen > 0.0 && fallen < 0.64 * 50.0 + 0.01, "fell {}", fallen);
            assert_eq!(p.max_life, 2500.0);
        }
        for p in effects.bubbles.active_particles() {
            let risen = height_before(&bubbles, p.id) - p.position.y;
            assert!(risen > 0.32 * 50.0 - 0.01 && risen < 0.96 * 50.0 + 0.01, "rose {}", risen);
        }
    }

    #[test]
    fn trail_dies_out_after_a_second() {
        let mut effects = effects();
        effects.page_changed();
        assert_eq!(effects.trail.len(), presets::TRAIL_COUNT);
        // 60 steps of 16ms
        effects.tick(Duration::from_millis(60 * 16));
        assert!(effects.trail.is_empty());
    }

    #[test]
    fn reveal_ring_surrounds_the_center() {
        let mut effects = effects();
        effects.reveal_question();
        let center = Vec2::new(640.0, 400.0);
        for p in effects.reveal.active_particles() {
            let distance =
                ((p.position.x - center.x).powi(2) + (p.position.y - center.y).powi(2)).sqrt();
            assert!((distance - 80.0).abs() < 1e-3);
        }
        assert_eq!(effects.reveal.len(), presets::REVEAL_COUNT);
    }
}
