/// Easing curves, named after their Jetpack Compose counterparts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowInEasing,
    /// Material deceleration curve, used for elements entering the screen.
    LinearOutSlowInEasing,
    /// Material acceleration curve, used for elements leaving the screen.
    FastOutLinearEasing,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        let curve = match self {
            Easing::LinearEasing => return fraction.clamp(0.0, 1.0),
            Easing::EaseIn => CubicBezier::new(0.42, 0.0, 1.0, 1.0),
            Easing::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Easing::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
            Easing::FastOutSlowInEasing => CubicBezier::new(0.4, 0.0, 0.2, 1.0),
            Easing::LinearOutSlowInEasing => CubicBezier::new(0.0, 0.0, 0.2, 1.0),
            Easing::FastOutLinearEasing => CubicBezier::new(0.4, 0.0, 1.0, 1.0),
        };
        curve.solve(fraction)
    }
}

/// Unit cubic bezier from (0, 0) to (1, 1) with two control points, stored in
/// polynomial form for each axis.
#[derive(Debug, Clone, Copy)]
struct CubicBezier {
    x: Cubic,
    y: Cubic,
}

#[derive(Debug, Clone, Copy)]
struct Cubic {
    a: f32,
    b: f32,
    c: f32,
}

impl Cubic {
    fn from_control_points(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self { a: 1.0 - c - b, b, c }
    }

    fn sample(&self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn slope(&self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

const EPSILON: f32 = 1e-6;

impl CubicBezier {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Cubic::from_control_points(x1, x2),
            y: Cubic::from_control_points(y1, y2),
        }
    }

    fn solve(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        self.y.sample(self.parameter_for(fraction))
    }

    /// Find `t` with `x(t) == fraction`: Newton first, bisection when the
    /// slope flattens out.
    fn parameter_for(&self, fraction: f32) -> f32 {
        let mut t = fraction;
        for _ in 0..8 {
            let error = self.x.sample(t) - fraction;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.x.slope(t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..24 {
            let error = self.x.sample(t) - fraction;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }
}
