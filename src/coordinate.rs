use crate::cartesian::CartesianCoordinate;
use crate::error::{InvalidArgument, Reason};
use crate::spheric::SphericCoordinate;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::{Angle, Length};
use uom::si::length::meter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default distance below which two coordinates compare equal, in meters.
const DEFAULT_TOLERANCE_METERS: f64 = 1e-6;

/// The tolerance used by the `is_equal` family when none is given explicitly.
///
/// Comparisons that need a different trade-off (eg, after many chained
/// conversions) should use the `is_equal_within` methods instead of relying
/// on this crate-wide default.
#[must_use]
pub fn default_tolerance() -> Length {
    Length::new::<meter>(DEFAULT_TOLERANCE_METERS)
}

/// The capability shared by every coordinate representation.
///
/// Both metrics deliberately route through a single canonical frame: distance
/// always projects both sides to cartesian, the central angle always projects
/// both sides to spherical. That indirection is what makes the operations
/// commutative regardless of which concrete representation each operand uses,
/// and keeps [`default_tolerance`] the one source of truth for equality.
///
/// The set of implementors is closed by design: [`CartesianCoordinate`],
/// [`SphericCoordinate`], and the [`AnyCoordinate`] sum of the two.
pub trait Coordinate {
    /// Projects this coordinate into the cartesian representation.
    fn to_cartesian(&self) -> CartesianCoordinate;

    /// Projects this coordinate into the spherical representation.
    fn to_spheric(&self) -> SphericCoordinate;

    /// The locale-invariant textual form of this coordinate.
    fn as_text(&self) -> String;

    /// Computes the Euclidean distance between the cartesian projections of
    /// the two coordinates.
    ///
    /// Comparing an instance against itself short-circuits to exactly zero.
    fn cartesian_distance(&self, other: &dyn Coordinate) -> Length {
        if std::ptr::addr_eq(self as *const Self, other as *const dyn Coordinate) {
            return Length::new::<meter>(0.);
        }
        self.to_cartesian().distance_to(&other.to_cartesian())
    }

    /// Computes the central angle between the spherical projections of the
    /// two coordinates. The result is in `[0, π]`.
    fn central_angle(&self, other: &dyn Coordinate) -> Angle {
        self.to_spheric().central_angle_to(&other.to_spheric())
    }

    /// Whether the two coordinates describe the same geometric point, within
    /// [`default_tolerance`].
    ///
    /// Same-instance comparisons short-circuit to `true` without projecting.
    fn is_equal(&self, other: &dyn Coordinate) -> bool {
        if std::ptr::addr_eq(self as *const Self, other as *const dyn Coordinate) {
            return true;
        }
        self.to_cartesian().distance_to(&other.to_cartesian()) <= default_tolerance()
    }

    /// Whether the two coordinates describe the same geometric point, within
    /// `tolerance`. Rejects a negative tolerance with [`InvalidArgument`],
    /// even on the same-instance fast path.
    fn is_equal_within(
        &self,
        other: &dyn Coordinate,
        tolerance: Length,
    ) -> Result<bool, InvalidArgument> {
        if tolerance < Length::new::<meter>(0.) {
            return Err(InvalidArgument::new("tolerance", Reason::NegativeTolerance));
        }
        if std::ptr::addr_eq(self as *const Self, other as *const dyn Coordinate) {
            return Ok(true);
        }
        Ok(self.to_cartesian().distance_to(&other.to_cartesian()) <= tolerance)
    }
}

/// A coordinate in either of the two representations.
///
/// This is the polymorphic currency of the [`wire`](crate::wire) format:
/// parsing a discriminated string can yield either representation, and the
/// variant records which one so the value re-serializes under the same
/// discriminator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnyCoordinate {
    Cartesian(CartesianCoordinate),
    Spheric(SphericCoordinate),
}

impl AnyCoordinate {
    /// The wire-format discriminator naming this value's representation.
    #[must_use]
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Cartesian(_) => crate::wire::CARTESIAN,
            Self::Spheric(_) => crate::wire::SPHERIC,
        }
    }
}

impl Coordinate for AnyCoordinate {
    fn to_cartesian(&self) -> CartesianCoordinate {
        match self {
            Self::Cartesian(c) => *c,
            Self::Spheric(s) => s.to_cartesian(),
        }
    }

    fn to_spheric(&self) -> SphericCoordinate {
        match self {
            Self::Cartesian(c) => c.to_spheric(),
            Self::Spheric(s) => *s,
        }
    }

    fn as_text(&self) -> String {
        self.to_string()
    }
}

/// Renders the bare coordinate payload, without the discriminator (for the
/// discriminated form, see [`wire::format_located`](crate::wire::format_located)).
impl Display for AnyCoordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cartesian(c) => Display::fmt(c, f),
            Self::Spheric(s) => Display::fmt(s, f),
        }
    }
}

impl From<CartesianCoordinate> for AnyCoordinate {
    fn from(value: CartesianCoordinate) -> Self {
        Self::Cartesian(value)
    }
}

impl From<SphericCoordinate> for AnyCoordinate {
    fn from(value: SphericCoordinate) -> Self {
        Self::Spheric(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use uom::si::angle::radian;

    fn m(v: f64) -> Length {
        Length::new::<meter>(v)
    }

    fn rad(v: f64) -> Angle {
        Angle::new::<radian>(v)
    }

    /// The same point, once per representation: one meter along positive X.
    fn unit_x() -> (CartesianCoordinate, SphericCoordinate) {
        let cartesian = CartesianCoordinate::from_values(m(1.), m(0.), m(0.)).unwrap();
        let spheric =
            SphericCoordinate::from_values(rad(0.), rad(FRAC_PI_2), m(1.)).unwrap();
        (cartesian, spheric)
    }

    #[test]
    fn equality_is_commutative_across_representations() {
        let (cartesian, spheric) = unit_x();

        assert!(cartesian.is_equal(&spheric));
        assert!(spheric.is_equal(&cartesian));

        let other = CartesianCoordinate::from_values(m(0.), m(1.), m(0.)).unwrap();
        assert!(!other.is_equal(&spheric));
        assert!(!spheric.is_equal(&other));
    }

    #[test]
    fn same_instance_short_circuits() {
        let (cartesian, _) = unit_x();

        assert!(cartesian.is_equal(&cartesian));
        assert_eq!(cartesian.cartesian_distance(&cartesian), m(0.));

        // the fast path must not mask a bogus tolerance
        assert!(cartesian.is_equal_within(&cartesian, m(-1.)).is_err());
        assert!(cartesian.is_equal_within(&cartesian, m(0.)).unwrap());
    }

    #[test]
    fn distance_projects_both_sides_to_cartesian() {
        let (cartesian, spheric) = unit_x();
        let origin = CartesianCoordinate::origin();

        assert!((spheric.cartesian_distance(&origin) - m(1.)).abs() < m(1e-9));
        assert_eq!(
            cartesian.cartesian_distance(&spheric),
            spheric.cartesian_distance(&cartesian),
        );
    }

    #[test]
    fn central_angle_projects_both_sides_to_spheric() {
        let unit_x = CartesianCoordinate::from_values(m(1.), m(0.), m(0.)).unwrap();
        let unit_y = CartesianCoordinate::from_values(m(0.), m(1.), m(0.)).unwrap();

        let angle = unit_x.central_angle(&unit_y);
        assert!((angle - rad(FRAC_PI_2)).abs() < rad(1e-6));
        assert_eq!(angle, unit_y.central_angle(&unit_x));
    }

    #[test]
    fn any_coordinate_delegates_to_its_variant() {
        let (cartesian, spheric) = unit_x();
        let a = AnyCoordinate::from(cartesian);
        let b = AnyCoordinate::from(spheric);

        assert_eq!(a.discriminator(), "cartesian");
        assert_eq!(b.discriminator(), "spheric");
        assert!(a.is_equal(&b));
        assert_eq!(a.as_text(), cartesian.to_string());
        assert_eq!(b.as_text(), spheric.to_string());
    }

    #[test]
    fn trait_objects_compare_through_the_canonical_frame() {
        let (cartesian, spheric) = unit_x();
        let values: Vec<Box<dyn Coordinate>> = vec![Box::new(cartesian), Box::new(spheric)];

        for a in &values {
            for b in &values {
                assert!(a.is_equal(b.as_ref()));
                assert!(a.cartesian_distance(b.as_ref()) <= default_tolerance());
            }
        }
    }
}
