//! The textual external interface consumed by storage layers.
//!
//! Two layers of format live here:
//!
//! - the bare coordinate form, three space-separated locale-invariant
//!   decimal numbers (period as decimal separator, no grouping), produced by
//!   the `Display` impls and consumed by the `FromStr` impls of the
//!   coordinate types; and
//! - the composite "located entity" form
//!   `"<discriminator>_<coordinate-string>"`, where the discriminator names
//!   the representation to reconstruct. The empty string denotes "no
//!   location set".
//!
//! Reconstruction dispatches through an explicit lookup table over the
//! finite, statically known set of representations; there is no dynamic
//! type machinery involved.

use crate::cartesian::CartesianCoordinate;
use crate::coordinate::AnyCoordinate;
use crate::error::{InvalidArgument, Reason};
use crate::spheric::SphericCoordinate;

/// Discriminator naming the cartesian representation.
pub const CARTESIAN: &str = "cartesian";

/// Discriminator naming the spherical representation.
pub const SPHERIC: &str = "spheric";

/// Splits a bare coordinate string into its three numeric components.
///
/// Returns `None` for a blank string, whether empty or all whitespace
/// (callers map that to their origin value). Rejects anything else that is
/// not exactly three parsable tokens; NaN and domain checks are the
/// constructors' job.
pub(crate) fn parse_triple(s: &str) -> Result<Option<[f64; 3]>, InvalidArgument> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(InvalidArgument::new(
            "value",
            Reason::WrongTokenCount(tokens.len()),
        ));
    }

    let mut components = [0.; 3];
    for (component, token) in components.iter_mut().zip(&tokens) {
        *component = token.parse().map_err(|_| {
            InvalidArgument::new("value", Reason::UnparsableNumber((*token).to_owned()))
        })?;
    }
    Ok(Some(components))
}

type Parser = fn(&str) -> Result<AnyCoordinate, InvalidArgument>;

fn parse_cartesian(payload: &str) -> Result<AnyCoordinate, InvalidArgument> {
    payload
        .parse::<CartesianCoordinate>()
        .map(AnyCoordinate::Cartesian)
}

fn parse_spheric(payload: &str) -> Result<AnyCoordinate, InvalidArgument> {
    payload
        .parse::<SphericCoordinate>()
        .map(AnyCoordinate::Spheric)
}

/// Maps each known discriminator to the parser for its payload.
const PARSERS: &[(&str, Parser)] = &[(CARTESIAN, parse_cartesian), (SPHERIC, parse_spheric)];

/// Parses a located-entity string into the coordinate it carries.
///
/// The empty string means "no location set" and yields `Ok(None)`. Anything
/// else must be `"<discriminator>_<payload>"` with a known discriminator and
/// a payload the matching representation accepts.
///
/// # Examples
///
/// ```rust
/// use locus::wire;
///
/// let location = wire::parse_located("cartesian_1 2 3")?.expect("non-empty");
/// assert_eq!(location.discriminator(), "cartesian");
/// assert!(wire::parse_located("")?.is_none());
/// assert!(wire::parse_located("polar_1 2 3").is_err());
/// # Ok::<(), locus::InvalidArgument>(())
/// ```
pub fn parse_located(value: &str) -> Result<Option<AnyCoordinate>, InvalidArgument> {
    if value.is_empty() {
        return Ok(None);
    }

    let Some((discriminator, payload)) = value.split_once('_') else {
        return Err(InvalidArgument::new("value", Reason::MissingPayload));
    };

    let Some((_, parser)) = PARSERS.iter().find(|(name, _)| *name == discriminator) else {
        return Err(InvalidArgument::new(
            "value",
            Reason::UnknownDiscriminator(discriminator.to_owned()),
        ));
    };

    parser(payload).map(Some)
}

/// Renders a (possibly absent) coordinate in the located-entity form.
///
/// Inverse of [`parse_located`]: `None` becomes the empty string, a present
/// coordinate becomes its discriminator, an underscore, and its textual form.
#[must_use]
pub fn format_located(coordinate: Option<&AnyCoordinate>) -> String {
    match coordinate {
        None => String::new(),
        Some(coordinate) => format!("{}_{coordinate}", coordinate.discriminator()),
    }
}
