use std::time::Duration;

use crate::effects::particle::{Edge, Emitter, ParticleProfile, Shape, SpawnPolicy};

pub const KAWAII_COLORS: &[&str] = &[
    "#FFB6C1", // light pink
    "#DDA0DD", // plum
    "#98FB98", // pale green
    "#F0E68C", // khaki
    "#87CEEB", // sky blue
    "#FFE4E1", // misty rose
    "#E6E6FA", // lavender
    "#FFEFD5", // papaya whip
];

const TRAIL_COLORS: &[&str] = &["#FFB6C1", "#DDA0DD", "#98FB98", "#F0E68C", "#87CEEB"];

pub const CONFETTI_BURST: usize = 50;
pub const CONFETTI_STREAM_BATCH: usize = 3;
pub const CONFETTI_STREAM_EVERY: Duration = Duration::from_millis(200);
pub const INITIAL_PETALS: usize = 15;
pub const TRAIL_COUNT: usize = 20;
pub const REVEAL_COUNT: usize = 8;

const CONFETTI_STREAM: SpawnPolicy = SpawnPolicy::Ambient {
    edge: Edge::Top,
    vx: (-4.0, 4.0),
    vy: (2.0, 5.0),
};

// Petals and bubbles are tuned per 50 ms frame; their speeds below are
// scaled down to the 16 ms integration step.
const FRAME_SCALE: f32 = 16.0 / 50.0;

const PETAL_FALL: (f32, f32) = (0.5 * FRAME_SCALE, 2.0 * FRAME_SCALE);

const FALLING_PETAL: SpawnPolicy = SpawnPolicy::Ambient {
    edge: Edge::Top,
    vx: (0.0, 0.0),
    vy: PETAL_FALL,
};

const RISING_BUBBLE: SpawnPolicy = SpawnPolicy::Ambient {
    edge: Edge::Bottom,
    vx: (0.0, 0.0),
    vy: (-3.0 * FRAME_SCALE, -1.0 * FRAME_SCALE),
};

const TWINKLE: SpawnPolicy = SpawnPolicy::Ambient {
    edge: Edge::Anywhere,
    vx: (0.0, 0.0),
    vy: (0.0, 0.0),
};

/// Celebration burst: heavy, tumbling, slowed by air.
pub fn confetti() -> ParticleProfile {
    ParticleProfile {
        name: "confetti",
        spawn: SpawnPolicy::Burst {
            offset: 50.0,
            speed: (5.0, 15.0),
            lift: 5.0,
        },
        gravity: 0.3,
        air_drag: 0.99,
        cull_above: false,
        palette: KAWAII_COLORS,
        shapes: &[Shape::Heart, Shape::Star, Shape::Flower, Shape::Circle],
        life: (180.0, 300.0),
        scale: (0.5, 1.5),
        rotation_speed: (-5.0, 5.0),
        sway: (0.0, 0.0),
    }
}

pub fn confetti_stream() -> Emitter {
    Emitter::new(
        CONFETTI_STREAM,
        CONFETTI_STREAM_BATCH,
        (CONFETTI_STREAM_EVERY, CONFETTI_STREAM_EVERY),
    )
}

pub fn petals() -> ParticleProfile {
    ParticleProfile {
        name: "petals",
        spawn: FALLING_PETAL,
        gravity: 0.0,
        air_drag: 1.0,
        cull_above: false,
        palette: &["#FFB7C5", "#FFC0CB", "#FFE4E1"],
        shapes: &[Shape::Petal],
        // about 40 s, enough for an average petal to cross the viewport
        life: (2500.0, 2500.0),
        scale: (0.5, 1.3),
        rotation_speed: (FRAME_SCALE, FRAME_SCALE),
        sway: (-FRAME_SCALE, FRAME_SCALE),
    }
}

/// Petals already on screen when the page loads.
pub fn petal_seed() -> SpawnPolicy {
    SpawnPolicy::Ambient {
        edge: Edge::Anywhere,
        vx: (0.0, 0.0),
        vy: PETAL_FALL,
    }
}

pub fn petal_drift() -> Emitter {
    Emitter::new(
        FALLING_PETAL,
        1,
        (Duration::from_millis(2000), Duration::from_millis(3500)),
    )
}

pub fn bubbles() -> ParticleProfile {
    ParticleProfile {
        name: "bubbles",
        spawn: RISING_BUBBLE,
        gravity: 0.0,
        air_drag: 1.0,
        cull_above: true,
        palette: &["#E0F7FF", "#F3E5F5"],
        shapes: &[Shape::Bubble],
        life: (5000.0, 5000.0),
        scale: (1.0, 4.0),
        rotation_speed: (0.0, 0.0),
        sway: (0.5 * FRAME_SCALE, 0.5 * FRAME_SCALE),
    }
}

pub fn bubble_rise() -> Emitter {
    Emitter::new(
        RISING_BUBBLE,
        1,
        (Duration::from_millis(2000), Duration::from_millis(5000)),
    )
}

pub fn sparkles() -> ParticleProfile {
    ParticleProfile {
        name: "sparkles",
        spawn: TWINKLE,
        gravity: 0.0,
        air_drag: 1.0,
        cull_above: false,
        palette: &["#FFF59D", "#FFFFFF"],
        shapes: &[Shape::Sparkle],
        // two to five seconds at the nominal step
        life: (120.0, 300.0),
        scale: (0.2, 0.6),
        rotation_speed: (0.0, 0.0),
        sway: (0.0, 0.0),
    }
}

pub fn sparkle_twinkle() -> Emitter {
    Emitter::new(
        TWINKLE,
        1,
        (Duration::from_millis(800), Duration::from_millis(2000)),
    )
}

/// Short-lived dots thrown across the screen on every page change.
pub fn transition_trail() -> ParticleProfile {
    ParticleProfile {
        name: "trail",
        spawn: SpawnPolicy::Scatter { speed: 2.0 },
        gravity: 0.1,
        air_drag: 1.0,
        cull_above: false,
        palette: TRAIL_COLORS,
        shapes: &[Shape::Dot],
        life: (60.0, 60.0),
        scale: (0.2, 0.8),
        rotation_speed: (0.0, 0.0),
        sway: (0.0, 0.0),
    }
}

/// Ring of sparkles around a freshly shown question.
pub fn sparkle_reveal() -> ParticleProfile {
    ParticleProfile {
        name: "reveal",
        spawn: SpawnPolicy::Ring { radius: 80.0 },
        gravity: 0.0,
        air_drag: 1.0,
        cull_above: false,
        palette: &["#FFF59D", "#FFB6C1", "#E6E6FA"],
        shapes: &[Shape::Sparkle, Shape::Star],
        life: (30.0, 30.0),
        scale: (1.0, 1.5),
        rotation_speed: (3.0, 3.0),
        sway: (0.0, 0.0),
    }
}
