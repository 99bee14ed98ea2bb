/// An implementation of a time-decaying value
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f32) -> f32;
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f32) -> f32 {
        self.value
    }
}

/// v(t) = v<sub>i</sub> * r<sup>t</sup>
///
/// Each unit of time multiplies the value by `rate`, so the value decays
/// toward zero without ever reaching it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometric {
    vi: f32,
    rate: f32,
}

impl Geometric {
    pub fn new(vi: f32, rate: f32) -> Result<Self, String> {
        (vi > 0.0 && rate > 0.0 && rate < 1.0)
            .then_some(Self { vi, rate })
            .ok_or_else(|| String::from("`vi` must be positive and `rate` must be in (0, 1)"))
    }
}

impl Decay for Geometric {
    fn evaluate(&self, t: f32) -> f32 {
        let &Self { vi, rate } = self;
        vi * rate.powf(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_decay() {
        let x = Constant::new(1.0);
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 1.0);
    }

    #[test]
    fn geometric_decay() {
        let x = Geometric::new(1.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 1.0);
        assert_eq!(x.evaluate(1.0), 0.5);
        assert_eq!(x.evaluate(3.0), 0.5f32.powf(3.0));
    }

    #[test]
    fn geometric_validation() {
        assert!(Geometric::new(1.0, 0.9).is_ok());
        assert!(Geometric::new(1.0, 0.0).is_err());
        assert!(Geometric::new(1.0, 1.0).is_err());
        assert!(Geometric::new(0.0, 0.9).is_err());
    }
}
