//! Validated cartesian and spherical coordinate value types with
//! tolerance-aware equality and a canonicalizing instance cache.
//!
//! The library provides two immutable representations of a point in 3-D
//! space -- [`CartesianCoordinate`] (x, y, z) and [`SphericCoordinate`]
//! (azimuth, polar angle, radius) -- behind one shared [`Coordinate`]
//! capability. Every field is validated at construction (no NaN, no
//! infinities, spherical angles and radius inside their domains), so a value
//! that exists is a value whose invariants hold; all "modification" is
//! value-producing.
//!
//! Cross-representation operations route through a canonical frame:
//! distances project both operands to cartesian, central angles to
//! spherical. That is what makes equality and the metrics commutative no
//! matter which representation each operand happens to use, and keeps the
//! equality tolerance ([`default_tolerance`]) in exactly one place.
//!
//! # Examples
//!
//! ```
//! use locus::{CartesianCoordinate, Coordinate, SphericCoordinate};
//! use uom::si::f64::{Angle, Length};
//! use uom::si::{angle::radian, length::meter};
//!
//! // the same point, described twice:
//! let cartesian = CartesianCoordinate::from_values(
//!     Length::new::<meter>(1.),
//!     Length::new::<meter>(0.),
//!     Length::new::<meter>(0.),
//! )?;
//! let spheric = SphericCoordinate::from_values(
//!     Angle::new::<radian>(0.),                          // azimuth
//!     Angle::new::<radian>(std::f64::consts::FRAC_PI_2), // polar angle
//!     Length::new::<meter>(1.),                          // radius
//! )?;
//!
//! // equality is commutative across representations:
//! assert!(cartesian.is_equal(&spheric));
//! assert!(spheric.is_equal(&cartesian));
//! # Ok::<(), locus::InvalidArgument>(())
//! ```
//!
//! Coordinates obtained through a [`CoordinateCache`] are additionally
//! *interned*: structurally identical values (exact field bits) resolve to
//! one shared instance, so identity comparisons and the identity fast paths
//! in the metrics kick in, and equal values are stored once.
//!
//! ```
//! use locus::CoordinateCache;
//! use std::sync::Arc;
//! use uom::si::f64::Length;
//! use uom::si::length::meter;
//!
//! let cache = CoordinateCache::new();
//! let m = |v| Length::new::<meter>(v);
//!
//! let a = cache.cartesian(m(1.), m(2.), m(3.))?;
//! let b = cache.cartesian(m(1.), m(2.), m(3.))?;
//! assert!(Arc::ptr_eq(&a, &b)); // one canonical instance
//! # Ok::<(), locus::InvalidArgument>(())
//! ```
//!
//! For storage, every coordinate has a locale-invariant textual form
//! (`"<a> <b> <c>"`, parsed back via `FromStr`), and the [`wire`] module
//! adds the discriminated `"<representation>_<payload>"` form used to
//! persist a possibly-absent location.

mod cartesian;
mod coordinate;
mod error;
mod guard;
mod interning;
mod spheric;

pub mod wire;

pub(crate) type Point3 = nalgebra::Point3<f64>;

pub use cartesian::CartesianCoordinate;
pub use coordinate::{default_tolerance, AnyCoordinate, Coordinate};
pub use error::{InvalidArgument, Reason};
pub use interning::CoordinateCache;
pub use spheric::SphericCoordinate;
