//! Angle value type.
//!
//! [`Angle`] stores radians as `f64`. It doubles as a component so an entity
//! can carry an orientation that actions animate.

use bevy_ecs::prelude::Component;
use std::f64::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    pub fn from_radians(radians: f64) -> Self {
        Angle(radians)
    }

    pub fn from_degrees(degrees: f64) -> Self {
        Angle(degrees.to_radians())
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Normalize into `[0°, 360°)`.
    pub fn mod_360(self) -> Self {
        if (0.0..2.0 * PI).contains(&self.0) {
            return self;
        }
        Angle(self.0.rem_euclid(2.0 * PI))
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        Angle(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_degree_to_radian() {
        let cases = [
            (0.0, 0.0),
            (-45.0, -PI / 4.0),
            (45.0, PI / 4.0),
            (180.0, PI),
            (200.0, 3.490658503988659),
        ];
        for (deg, rad) in cases {
            assert!(
                approx_eq(Angle::from_degrees(deg).radians(), rad),
                "{deg} degrees should be {rad} radians"
            );
        }
    }

    #[test]
    fn test_radian_to_degree() {
        assert!(approx_eq(Angle::from_radians(PI / 4.0).degrees(), 45.0));
        assert!(approx_eq(Angle::from_radians(-PI / 4.0).degrees(), -45.0));
        assert!(approx_eq(Angle::from_radians(3.490658503988659).degrees(), 200.0));
    }

    #[test]
    fn test_mod_360() {
        assert!(approx_eq(Angle::from_degrees(370.0).mod_360().degrees(), 10.0));
        assert!(approx_eq(Angle::from_degrees(-90.0).mod_360().degrees(), 270.0));
        assert_eq!(Angle::from_degrees(45.0).mod_360(), Angle::from_degrees(45.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Angle::from_radians(1.0) + Angle::from_radians(0.5) - Angle::from_radians(0.25);
        assert!(approx_eq(a.radians(), 1.25));
        assert!(approx_eq((-a * 2.0).radians(), -2.5));
    }

    #[test]
    fn test_trigonometry() {
        assert!(approx_eq(Angle::from_degrees(90.0).sin(), 1.0));
        assert!(approx_eq(Angle::from_degrees(180.0).cos(), -1.0));
    }
}
