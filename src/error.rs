use thiserror::Error;

/// The reason a particular argument was rejected.
///
/// Carried inside [`InvalidArgument`]; useful when callers want to
/// distinguish, say, a domain violation from a parse failure without
/// matching on the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Reason {
    /// The value was NaN.
    #[error("NaN")]
    NaN,

    /// The value was positive or negative infinity.
    #[error("infinite")]
    Infinite,

    /// The value was finite but outside the argument's domain.
    ///
    /// The payload is a human-readable description of the expected domain,
    /// eg `"in [0, 2π)"`.
    #[error("out of range (must be {0})")]
    OutOfRange(&'static str),

    /// A comparison tolerance was negative.
    #[error("a negative tolerance")]
    NegativeTolerance,

    /// A textual coordinate did not split into exactly three tokens.
    #[error("made of {0} tokens where 3 were expected")]
    WrongTokenCount(usize),

    /// A token of a textual coordinate was not a number.
    #[error("made of the unparsable number `{0}`")]
    UnparsableNumber(String),

    /// A located-entity string named a representation this crate does not
    /// know how to reconstruct.
    #[error("tagged with the unknown representation `{0}`")]
    UnknownDiscriminator(String),

    /// A located-entity string had a discriminator but no `_`-separated
    /// payload.
    #[error("missing its coordinate payload")]
    MissingPayload,
}

/// A caller error: some argument failed validation at construction or parse
/// time.
///
/// This is the single error kind of the crate. Every fallible operation
/// rejects bad input synchronously, so that once a coordinate value exists
/// its invariants hold for the rest of its lifetime. There is nothing
/// transient about these failures and hence nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the argument `{argument}` must not be {reason}")]
pub struct InvalidArgument {
    argument: &'static str,
    reason: Reason,
}

impl InvalidArgument {
    pub(crate) fn new(argument: &'static str, reason: Reason) -> Self {
        Self { argument, reason }
    }

    /// The name of the rejected argument (eg, `"phi"` or `"value"`).
    #[must_use]
    pub fn argument(&self) -> &'static str {
        self.argument
    }

    /// Why the argument was rejected.
    #[must_use]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}
