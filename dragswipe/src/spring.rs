/// Damping ratios and stiffness values commonly used for list animations.
pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
pub const STIFFNESS_MEDIUM: f32 = 1500.0;
pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;

/// Physical description of a unit-mass spring.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringSpec {
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// The animation is considered finished once both the remaining displacement and the
    /// distance travelled in one 60 Hz frame drop below this value.
    pub threshold: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            threshold: 0.01,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// The spring used to settle a released item back into its slot.
    pub fn settle() -> Self {
        Self::new(DAMPING_RATIO_MEDIUM_BOUNCY, STIFFNESS_MEDIUM).with_threshold(0.5)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(DAMPING_RATIO_NO_BOUNCY, STIFFNESS_MEDIUM)
    }
}

/// A closed-form spring animation from `from` to `to`, sampled against a millisecond clock.
///
/// Sampling is stateless, so results do not depend on the frame rate of the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringAnimation {
    pub from: f32,
    pub to: f32,
    pub initial_velocity: f32,
    pub start_ms: u64,
    pub spec: SpringSpec,
}

impl SpringAnimation {
    pub fn new(from: f32, to: f32, initial_velocity: f32, start_ms: u64, spec: SpringSpec) -> Self {
        Self {
            from,
            to,
            initial_velocity,
            start_ms,
            spec,
        }
    }

    fn elapsed_secs(&self, now_ms: u64) -> f32 {
        now_ms.saturating_sub(self.start_ms) as f32 / 1000.0
    }

    /// Returns `(displacement, velocity)` relative to `to` after `t` seconds.
    fn solve(&self, t: f32) -> (f32, f32) {
        let y0 = self.from - self.to;
        let v0 = self.initial_velocity;
        let omega = self.spec.stiffness.max(f32::EPSILON).sqrt();
        let zeta = self.spec.damping_ratio.max(0.0);

        if zeta < 1.0 {
            let a = zeta * omega;
            let wd = omega * (1.0 - zeta * zeta).sqrt();
            let b = (v0 + a * y0) / wd;
            let decay = (-a * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let y = decay * (y0 * cos + b * sin);
            let v = decay * ((b * wd - a * y0) * cos - (y0 * wd + a * b) * sin);
            (y, v)
        } else if zeta == 1.0 {
            let c = v0 + omega * y0;
            let decay = (-omega * t).exp();
            let y = decay * (y0 + c * t);
            let v = decay * (v0 - omega * c * t);
            (y, v)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            let c2 = (v0 - r1 * y0) / (r2 - r1);
            let c1 = y0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        }
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        if self.is_done(now_ms) {
            return self.to;
        }
        let (y, _) = self.solve(self.elapsed_secs(now_ms));
        self.to + y
    }

    pub fn velocity(&self, now_ms: u64) -> f32 {
        if self.is_done(now_ms) {
            return 0.0;
        }
        self.solve(self.elapsed_secs(now_ms)).1
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        let (y, v) = self.solve(self.elapsed_secs(now_ms));
        let threshold = self.spec.threshold;
        y.abs() < threshold && (v / 60.0).abs() < threshold
    }
}

/// A value that either follows its target immediately (`snap_to`) or springs towards it
/// (`animate_to`).
///
/// Retargeting mid-flight keeps the current velocity so motion stays continuous.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatedValue {
    value: f32,
    target: f32,
    animation: Option<SpringAnimation>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            target: value,
            animation: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_some()
    }

    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.animation = None;
    }

    pub fn animate_to(&mut self, target: f32, spec: SpringSpec, now_ms: u64) {
        if self.target == target && (self.animation.is_some() || self.value == target) {
            return;
        }
        let velocity = self
            .animation
            .map(|anim| anim.velocity(now_ms))
            .unwrap_or(0.0);
        self.target = target;
        self.animation = Some(SpringAnimation::new(self.value, target, velocity, now_ms, spec));
    }

    /// Advances the animation and returns the current value.
    pub fn tick(&mut self, now_ms: u64) -> f32 {
        if let Some(anim) = self.animation {
            if anim.is_done(now_ms) {
                self.value = anim.to;
                self.animation = None;
            } else {
                self.value = anim.sample(now_ms);
            }
        }
        self.value
    }

    /// Stops the animation where it currently is.
    pub fn stop(&mut self) {
        self.animation = None;
        self.target = self.value;
    }
}
