/// A small tween helper for adapter-driven animated scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        self.from + (self.to - self.from) * eased
    }

    pub fn retarget(&mut self, now_ms: u64, new_to: f32, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms, self.easing);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    #[default]
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// Exponential velocity decay for flings.
///
/// `velocity` is in pixels per second; the travelled distance converges to
/// `velocity / friction`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decay {
    pub from: f32,
    pub velocity: f32,
    pub start_ms: u64,
    pub friction: f32,
}

/// A fling is over once it moves slower than this (px/s).
const DECAY_REST_VELOCITY: f32 = 1.0;

impl Decay {
    pub fn new(from: f32, velocity: f32, start_ms: u64, friction: f32) -> Self {
        Self {
            from,
            velocity,
            start_ms,
            friction: friction.max(f32::EPSILON),
        }
    }

    fn elapsed_secs(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.start_ms) as f32 / 1000.0
    }

    pub fn target(&self) -> f32 {
        self.from + self.velocity / self.friction
    }

    pub fn velocity_at(&self, now_ms: u64) -> f32 {
        self.velocity * (-self.friction * self.elapsed_secs(now_ms)).exp()
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        if self.is_done(now_ms) {
            return self.target();
        }
        let decay = (-self.friction * self.elapsed_secs(now_ms)).exp();
        self.from + self.velocity / self.friction * (1.0 - decay)
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        self.velocity_at(now_ms).abs() < DECAY_REST_VELOCITY
    }
}
