use crate::cartesian::CartesianCoordinate;
use crate::coordinate::Coordinate;
use crate::error::InvalidArgument;
use crate::{guard, Point3};
use std::f64::consts::PI;
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

/// A point in 3-D space given by azimuth, polar angle, and radius relative to
/// the origin.
///
/// The fields follow the physics convention for [spherical coordinates][sph]:
///
/// - `phi` is the azimuthal angle, in `[0, 2π)`;
/// - `theta` is the polar angle measured from the positive Z axis, in
///   `[0, π)`; and
/// - `radius` is the non-negative distance from the origin.
///
/// Out-of-domain angles are rejected at construction rather than normalized;
/// the caller is in a better position to decide whether, say, a negative
/// radius meant "the antipode" or a bug.
///
/// Derived `PartialEq` is *exact* field equality. Because distinct
/// (phi, theta) encodings can describe the same geometric point (every
/// azimuth at a pole, any angles at radius zero), the tolerance-aware
/// [`Coordinate::is_equal`] compares cartesian projections instead of raw
/// fields.
///
/// <div class="warning">
///
/// As with [`CartesianCoordinate`], `Deserialize` skips validation; prefer
/// [`SphericCoordinate::from_str`] for untrusted text.
///
/// </div>
///
/// [sph]: https://en.wikipedia.org/wiki/Spherical_coordinate_system
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphericCoordinate {
    phi: Angle,
    theta: Angle,
    radius: Length,
}

impl SphericCoordinate {
    /// Constructs a coordinate from azimuth, polar angle, and radius.
    ///
    /// All fields must be finite, `phi` in `[0, 2π)`, `theta` in `[0, π)`,
    /// and `radius` non-negative; anything else is rejected with
    /// [`InvalidArgument`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::SphericCoordinate;
    /// use uom::si::f64::{Angle, Length};
    /// use uom::si::{angle::radian, length::meter};
    ///
    /// let p = SphericCoordinate::from_values(
    ///     Angle::new::<radian>(1.2),
    ///     Angle::new::<radian>(0.7),
    ///     Length::new::<meter>(4.),
    /// )?;
    /// assert_eq!(p.radius(), Length::new::<meter>(4.));
    ///
    /// // the polar domain excludes π itself
    /// assert!(SphericCoordinate::from_values(
    ///     Angle::new::<radian>(0.),
    ///     Angle::new::<radian>(std::f64::consts::PI),
    ///     Length::new::<meter>(1.),
    /// )
    /// .is_err());
    /// # Ok::<(), locus::InvalidArgument>(())
    /// ```
    pub fn from_values(
        phi: impl Into<Angle>,
        theta: impl Into<Angle>,
        radius: impl Into<Length>,
    ) -> Result<Self, InvalidArgument> {
        Ok(Self {
            phi: Angle::new::<radian>(guard::azimuth("phi", phi.into().get::<radian>())?),
            theta: Angle::new::<radian>(guard::polar("theta", theta.into().get::<radian>())?),
            radius: Length::new::<meter>(guard::non_negative(
                "radius",
                radius.into().get::<meter>(),
            )?),
        })
    }

    /// Constructs the distinguished origin value (0, 0, 0).
    #[must_use]
    pub fn origin() -> Self {
        Self {
            phi: Angle::new::<radian>(0.),
            theta: Angle::new::<radian>(0.),
            radius: Length::new::<meter>(0.),
        }
    }

    /// The azimuthal angle, in `[0, 2π)`.
    #[must_use]
    pub fn phi(&self) -> Angle {
        self.phi
    }

    /// The polar angle, in `[0, π)`.
    #[must_use]
    pub fn theta(&self) -> Angle {
        self.theta
    }

    /// The distance from the origin.
    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    /// Computes the great-circle angle between the direction vectors of the
    /// two points, via the spherical law of cosines.
    ///
    /// The result is symmetric and always in `[0, π]`.
    #[must_use]
    pub fn central_angle_to(&self, other: &Self) -> Angle {
        let phi_diff = (self.phi.get::<radian>() - other.phi.get::<radian>()).abs();
        let theta_a = self.theta.get::<radian>();
        let theta_b = other.theta.get::<radian>();

        // rounding can push the cosine a few ulps outside [-1, 1], which
        // would turn the acos into NaN
        let cos_angle = (theta_a.sin() * theta_b.sin()
            + theta_a.cos() * theta_b.cos() * phi_diff.cos())
        .clamp(-1., 1.);

        let angle = cos_angle.acos();
        debug_assert!((0. ..=PI).contains(&angle));
        Angle::new::<radian>(angle)
    }

    /// Re-expresses this point in cartesian coordinates.
    ///
    /// This direction of the conversion is exact up to rounding; it has no
    /// singular points.
    #[must_use]
    pub fn to_cartesian(&self) -> CartesianCoordinate {
        let phi = self.phi.get::<radian>();
        let theta = self.theta.get::<radian>();
        let radius = self.radius.get::<meter>();

        let sin_theta = theta.sin();
        CartesianCoordinate::from_point(Point3::new(
            radius * sin_theta * phi.cos(),
            radius * sin_theta * phi.sin(),
            radius * theta.cos(),
        ))
    }

    /// The exact field bits, used as the interning key.
    pub(crate) fn bit_key(&self) -> [u64; 3] {
        [
            self.phi.get::<radian>().to_bits(),
            self.theta.get::<radian>().to_bits(),
            self.radius.get::<meter>().to_bits(),
        ]
    }
}

impl Default for SphericCoordinate {
    fn default() -> Self {
        Self::origin()
    }
}

impl Coordinate for SphericCoordinate {
    fn to_cartesian(&self) -> CartesianCoordinate {
        SphericCoordinate::to_cartesian(self)
    }

    fn to_spheric(&self) -> SphericCoordinate {
        *self
    }

    fn as_text(&self) -> String {
        self.to_string()
    }
}

/// Renders the locale-invariant `"<phi> <theta> <radius>"` wire form.
impl Display for SphericCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.phi.get::<radian>(),
            self.theta.get::<radian>(),
            self.radius.get::<meter>()
        )
    }
}

/// Parses the `"<phi> <theta> <radius>"` wire form; a blank string denotes
/// the origin.
impl FromStr for SphericCoordinate {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::wire::parse_triple(s)? {
            None => Ok(Self::origin()),
            Some([phi, theta, radius]) => Self::from_values(
                Angle::new::<radian>(phi),
                Angle::new::<radian>(theta),
                Length::new::<meter>(radius),
            ),
        }
    }
}

/// Field-wise comparison with one dimensionless epsilon applied to the raw
/// radian and meter magnitudes.
///
/// Unlike [`CartesianCoordinate`], whose three fields share a dimension and
/// so take a typed `Length` epsilon, this type mixes angles with a length;
/// a single typed epsilon could fit at most one of them. For the geometric
/// comparison use [`Coordinate::is_equal`] instead.
#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for SphericCoordinate {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.phi
            .get::<radian>()
            .abs_diff_eq(&other.phi.get::<radian>(), epsilon)
            && self
                .theta
                .get::<radian>()
                .abs_diff_eq(&other.theta.get::<radian>(), epsilon)
            && self
                .radius
                .get::<meter>()
                .abs_diff_eq(&other.radius.get::<meter>(), epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for SphericCoordinate {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.phi.get::<radian>().relative_eq(
            &other.phi.get::<radian>(),
            epsilon,
            max_relative,
        ) && self.theta.get::<radian>().relative_eq(
            &other.theta.get::<radian>(),
            epsilon,
            max_relative,
        ) && self.radius.get::<meter>().relative_eq(
            &other.radius.get::<meter>(),
            epsilon,
            max_relative,
        )
    }
}
