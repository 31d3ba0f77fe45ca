//! The canonicalizing instance cache.
//!
//! Structurally equal coordinates (exact field bits, not tolerance) obtained
//! through the cache resolve to one shared allocation, enabling
//! pointer-identity fast paths and deduplicated storage. This is purely an
//! identity and memory optimization: tolerance equality via `is_equal` works
//! the same with or without interning.

use crate::cartesian::CartesianCoordinate;
use crate::error::InvalidArgument;
use crate::spheric::SphericCoordinate;
use dashmap::DashMap;
use std::sync::Arc;
use uom::si::f64::{Angle, Length};

/// A per-representation pool of canonical coordinate instances.
///
/// Keys are the exact field bit patterns, so `0.1 + 0.2` and `0.3` intern to
/// *different* instances even though they compare `is_equal`; the cache never
/// merges tolerance-close values.
///
/// Construct one explicitly (typically once at process start) and pass or
/// inject it wherever coordinates are created; it is never torn down during
/// normal operation, and entries live for the lifetime of the cache.
/// `Clone` is cheap and yields a handle onto the same underlying pools.
///
/// Concurrent interning of the same key is race-free: the map's
/// insert-if-absent keeps the first instance and hands it to every caller,
/// so at most one canonical instance per key is ever live.
#[derive(Debug, Default)]
pub struct CoordinateCache {
    cartesian: Arc<DashMap<[u64; 3], Arc<CartesianCoordinate>>>,
    spheric: Arc<DashMap<[u64; 3], Arc<SphericCoordinate>>>,
}

impl CoordinateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cartesian: Arc::new(DashMap::new()),
            spheric: Arc::new(DashMap::new()),
        }
    }

    /// Validates (x, y, z) and returns the canonical instance for that exact
    /// triple.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use locus::CoordinateCache;
    /// use std::sync::Arc;
    /// use uom::si::f64::Length;
    /// use uom::si::length::meter;
    ///
    /// let cache = CoordinateCache::new();
    /// let m = |v| Length::new::<meter>(v);
    /// let a = cache.cartesian(m(1.), m(2.), m(3.))?;
    /// let b = cache.cartesian(m(1.), m(2.), m(3.))?;
    /// assert!(Arc::ptr_eq(&a, &b));
    /// # Ok::<(), locus::InvalidArgument>(())
    /// ```
    pub fn cartesian(
        &self,
        x: impl Into<Length>,
        y: impl Into<Length>,
        z: impl Into<Length>,
    ) -> Result<Arc<CartesianCoordinate>, InvalidArgument> {
        Ok(self.intern_cartesian(CartesianCoordinate::from_values(x, y, z)?))
    }

    /// Validates (phi, theta, radius) and returns the canonical instance for
    /// that exact triple.
    pub fn spheric(
        &self,
        phi: impl Into<Angle>,
        theta: impl Into<Angle>,
        radius: impl Into<Length>,
    ) -> Result<Arc<SphericCoordinate>, InvalidArgument> {
        Ok(self.intern_spheric(SphericCoordinate::from_values(phi, theta, radius)?))
    }

    /// Resolves an already-validated value to its canonical instance,
    /// inserting it if this is the first time the cache sees its exact bits.
    pub fn intern_cartesian(&self, value: CartesianCoordinate) -> Arc<CartesianCoordinate> {
        Arc::clone(
            self.cartesian
                .entry(value.bit_key())
                .or_insert_with(|| Arc::new(value))
                .value(),
        )
    }

    /// Spherical counterpart of [`CoordinateCache::intern_cartesian`].
    pub fn intern_spheric(&self, value: SphericCoordinate) -> Arc<SphericCoordinate> {
        Arc::clone(
            self.spheric
                .entry(value.bit_key())
                .or_insert_with(|| Arc::new(value))
                .value(),
        )
    }

    /// The number of canonical instances currently held, across both
    /// representations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cartesian.len() + self.spheric.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cartesian.is_empty() && self.spheric.is_empty()
    }
}

impl Clone for CoordinateCache {
    fn clone(&self) -> Self {
        Self {
            cartesian: Arc::clone(&self.cartesian),
            spheric: Arc::clone(&self.spheric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Coordinate;
    use std::f64::consts::FRAC_PI_2;
    use uom::si::angle::radian;
    use uom::si::length::meter;

    fn m(v: f64) -> Length {
        Length::new::<meter>(v)
    }

    fn rad(v: f64) -> Angle {
        Angle::new::<radian>(v)
    }

    #[test]
    fn identical_values_intern_to_one_instance() {
        let cache = CoordinateCache::new();

        let a = cache.cartesian(m(1.), m(2.), m(3.)).unwrap();
        let b = cache.cartesian(m(1.), m(2.), m(3.)).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is_equal(&*b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn tolerance_close_values_stay_distinct_instances() {
        let cache = CoordinateCache::new();
        let ulp = f64::EPSILON;

        let a = cache.cartesian(m(0.), m(0.), m(0.)).unwrap();
        let b = cache.cartesian(m(ulp), m(ulp), m(ulp)).unwrap();

        assert!(a.is_equal(&*b), "within tolerance");
        assert!(!Arc::ptr_eq(&a, &b), "but not the same canonical instance");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn representations_pool_separately() {
        let cache = CoordinateCache::new();

        let _ = cache.cartesian(m(0.), m(0.), m(1.)).unwrap();
        let _ = cache.spheric(rad(0.), rad(0.), m(1.)).unwrap();

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_values_are_rejected_before_interning() {
        let cache = CoordinateCache::new();

        assert!(cache.cartesian(m(f64::NAN), m(0.), m(0.)).is_err());
        assert!(cache.spheric(rad(-0.1), rad(0.), m(1.)).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn interned_instance_takes_the_identity_fast_path() {
        let cache = CoordinateCache::new();

        let a = cache.cartesian(m(1.), m(2.), m(3.)).unwrap();
        let b = cache.cartesian(m(1.), m(2.), m(3.)).unwrap();

        // both Arcs alias one allocation, so the &self/&other references
        // are pointer-identical and the distance is exactly zero
        assert_eq!(a.distance_to(&b), m(0.));
    }

    #[test]
    fn clones_share_the_underlying_pools() {
        let cache = CoordinateCache::new();
        let handle = cache.clone();

        let a = cache.cartesian(m(4.), m(5.), m(6.)).unwrap();
        let b = handle.cartesian(m(4.), m(5.), m(6.)).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn concurrent_interning_yields_one_canonical_instance() {
        let cache = CoordinateCache::new();

        let interned: Vec<Arc<SphericCoordinate>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let cache = cache.clone();
                    scope.spawn(move || {
                        cache
                            .spheric(rad(1.), rad(FRAC_PI_2), m(42.))
                            .expect("in-domain values")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("interning does not panic"))
                .collect()
        });

        let first = &interned[0];
        assert!(interned.iter().all(|arc| Arc::ptr_eq(first, arc)));
        assert_eq!(cache.len(), 1);
    }
}
