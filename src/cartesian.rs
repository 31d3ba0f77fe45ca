use crate::coordinate::{default_tolerance, Coordinate};
use crate::error::InvalidArgument;
use crate::spheric::SphericCoordinate;
use crate::{guard, Point3};
use std::f64::consts::TAU;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uom::si::angle::radian;
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Added to denominators during spherical conversion so the trigonometric
/// inverses stay defined at the origin and on the polar axis. The resulting
/// bias is far below [`default_tolerance`].
const EPSILON: f64 = f64::EPSILON;

/// A point in 3-D space given by (x, y, z) offsets along three orthogonal
/// axes, each a finite length.
///
/// Values are immutable: the `with_*` methods produce new values rather than
/// modifying `self`. Derived `PartialEq` is *exact* structural equality (the
/// interning key); use [`Coordinate::is_equal`] for the tolerance-aware
/// comparison that accommodates floating-point imprecision.
///
/// <div class="warning">
///
/// `Deserialize` is derived for ergonomics, but deserialization does not
/// re-run validation, so a hand-crafted payload can smuggle in NaN fields.
/// Prefer [`CartesianCoordinate::from_str`] for untrusted text.
///
/// </div>
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// no need for the "point": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CartesianCoordinate {
    /// X, Y, Z in meters
    point: Point3,
}

impl CartesianCoordinate {
    /// Wraps an already-validated point.
    pub(crate) fn from_point(point: Point3) -> Self {
        Self { point }
    }

    /// Constructs a coordinate from its three axis offsets.
    ///
    /// Each component must be finite; NaN and ±infinity are rejected with
    /// [`InvalidArgument`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::CartesianCoordinate;
    /// use uom::si::f64::Length;
    /// use uom::si::length::meter;
    ///
    /// let m = |v| Length::new::<meter>(v);
    /// let p = CartesianCoordinate::from_values(m(1.), m(2.), m(3.))?;
    /// assert_eq!(p.x(), m(1.));
    /// assert!(CartesianCoordinate::from_values(m(f64::NAN), m(0.), m(0.)).is_err());
    /// # Ok::<(), locus::InvalidArgument>(())
    /// ```
    pub fn from_values(
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            point: Point3::new(
                guard::finite("x", x.into().get::<meter>())?,
                guard::finite("y", y.into().get::<meter>())?,
                guard::finite("z", z.into().get::<meter>())?,
            ),
        })
    }

    /// Constructs the distinguished origin value (0, 0, 0).
    #[must_use]
    pub fn origin() -> Self {
        Self {
            point: Point3::origin(),
        }
    }

    #[must_use]
    pub fn x(&self) -> Length {
        Length::new::<meter>(self.point.x)
    }

    #[must_use]
    pub fn y(&self) -> Length {
        Length::new::<meter>(self.point.y)
    }

    #[must_use]
    pub fn z(&self) -> Length {
        Length::new::<meter>(self.point.z)
    }

    /// Returns a new coordinate with the X component replaced.
    pub fn with_x(&self, x: impl Into<Length>) -> Result<Self, InvalidArgument> {
        Self::from_values(x, self.y(), self.z())
    }

    /// Returns a new coordinate with the Y component replaced.
    pub fn with_y(&self, y: impl Into<Length>) -> Result<Self, InvalidArgument> {
        Self::from_values(self.x(), y, self.z())
    }

    /// Returns a new coordinate with the Z component replaced.
    pub fn with_z(&self, z: impl Into<Length>) -> Result<Self, InvalidArgument> {
        Self::from_values(self.x(), self.y(), z)
    }

    /// Computes the Euclidean distance between this point and `other`.
    ///
    /// Comparing a canonical (interned) instance against itself short-circuits
    /// to exactly zero without touching the arithmetic.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::CartesianCoordinate;
    /// use uom::si::f64::Length;
    /// use uom::si::length::meter;
    ///
    /// let m = |v| Length::new::<meter>(v);
    /// let a = CartesianCoordinate::from_values(m(-1.), m(-1.), m(-1.))?;
    /// let b = CartesianCoordinate::from_values(m(1.), m(1.), m(1.))?;
    /// assert!((a.distance_to(&b).get::<meter>() - 12f64.sqrt()).abs() < 1e-6);
    /// # Ok::<(), locus::InvalidArgument>(())
    /// ```
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> Length {
        if std::ptr::eq(self, other) {
            return Length::new::<meter>(0.);
        }

        let distance = (other.point - self.point).norm();
        debug_assert!(distance >= 0.);
        Length::new::<meter>(distance)
    }

    /// Re-expresses this point in spherical coordinates.
    ///
    /// The polar angle is computed as `acos(z / (radius + ε))`; the ε keeps
    /// the quotient defined even at the origin. The cost is a bias of well
    /// below the equality tolerance, largest for points on the polar axis
    /// (see [`SphericCoordinate::to_cartesian`] for the exact inverse).
    ///
    /// This conversion is total. A radius beyond `f64::MAX` (reachable when
    /// several components sit near the representational limit) saturates to
    /// `f64::MAX` rather than overflowing to infinity.
    #[must_use]
    pub fn to_spheric(&self) -> SphericCoordinate {
        // the naive sum of squares overflows for components beyond ~1e154
        // even though every field is finite, so factor out the largest
        // magnitude before taking the norm
        let scale = self.point.coords.amax();
        let radius = if scale == 0. {
            0.
        } else {
            (scale * (self.point.coords / scale).norm()).min(f64::MAX)
        };
        debug_assert!(radius.is_finite() && radius >= 0.);

        // rounding in the norm can land the quotient a hair outside
        // [-1, 1]; the lower clamp sits one ε inside so the inverse cosine
        // stays short of π, which the polar domain excludes
        let theta = (self.point.z / (radius + EPSILON))
            .clamp(EPSILON - 1., 1.)
            .acos();

        // atan2 covers all four quadrants; fold its (-π, π] range into the
        // [0, 2π) azimuth domain. The fold can round a denormal-negative
        // azimuth up to 2π itself, which the domain excludes.
        let mut phi = self.point.y.atan2(self.point.x).rem_euclid(TAU);
        if phi >= TAU {
            phi = 0.;
        }

        SphericCoordinate::from_values(
            Angle::new::<radian>(phi),
            Angle::new::<radian>(theta),
            Length::new::<meter>(radius),
        )
        .expect("the radius is finite and non-negative, the clamped acos lands in [0, π), and the azimuth is folded into [0, 2π)")
    }

    /// The exact field bits, used as the interning key.
    pub(crate) fn bit_key(&self) -> [u64; 3] {
        [
            self.point.x.to_bits(),
            self.point.y.to_bits(),
            self.point.z.to_bits(),
        ]
    }
}

impl Default for CartesianCoordinate {
    fn default() -> Self {
        Self::origin()
    }
}

impl Coordinate for CartesianCoordinate {
    fn to_cartesian(&self) -> CartesianCoordinate {
        *self
    }

    fn to_spheric(&self) -> SphericCoordinate {
        CartesianCoordinate::to_spheric(self)
    }

    fn as_text(&self) -> String {
        self.to_string()
    }
}

/// Renders the locale-invariant `"<x> <y> <z>"` wire form.
impl Display for CartesianCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.point.x, self.point.y, self.point.z)
    }
}

/// Parses the `"<x> <y> <z>"` wire form; a blank string denotes the origin.
impl FromStr for CartesianCoordinate {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::wire::parse_triple(s)? {
            None => Ok(Self::origin()),
            Some([x, y, z]) => Self::from_values(
                Length::new::<meter>(x),
                Length::new::<meter>(y),
                Length::new::<meter>(z),
            ),
        }
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for CartesianCoordinate {
    type Epsilon = Length;

    fn default_epsilon() -> Self::Epsilon {
        default_tolerance()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        // NOTE: this bounds the difference in each _one_ component by epsilon,
        // not the magnitude of the separation vector (which is what
        // `is_equal_within` bounds).
        self.point.abs_diff_eq(&other.point, epsilon.get::<meter>())
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for CartesianCoordinate {
    fn default_max_relative() -> Self::Epsilon {
        Length::new::<meter>(Point3::default_max_relative())
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.point.relative_eq(
            &other.point,
            epsilon.get::<meter>(),
            max_relative.get::<meter>(),
        )
    }
}
