use crate::BuildResult;

/// The builder half of a record/builder pair.
///
/// A `Buildable` holds the fields of its [`Target`](Buildable::Target) in a
/// mutable, possibly incomplete form. [`build`](Buildable::build) assembles a
/// new target from whatever is currently set.
///
/// Implementations must be reentrant: calling `build` twice without touching
/// the builder in between yields two values that compare equal. The result
/// depends on the builder's fields and nothing else.
pub trait Buildable {
    /// The immutable value this builder produces.
    type Target;

    /// Assembles a value from the fields set on this builder.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingFields`](crate::BuildError::MissingFields)
    /// naming every required field that is unset, or
    /// [`BuildError::Validation`](crate::BuildError::Validation) when the
    /// assembled value breaks a rule of its type.
    fn build(&self) -> BuildResult<Self::Target>;
}

/// The record half of a record/builder pair.
///
/// `to_builder` is the only sanctioned way to get a mutable view of an
/// otherwise immutable value. The returned builder carries exactly the
/// receiver's field values, so for every value `v`:
///
/// ```text
/// v.to_builder().build() == Ok(v)
/// ```
pub trait ToBuilder: Sized {
    /// Builder type that produces `Self` back.
    type Builder: Buildable<Target = Self>;

    /// Creates a builder primed with this value's fields.
    fn to_builder(&self) -> Self::Builder;
}
