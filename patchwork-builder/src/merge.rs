use crate::Buildable;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

/// Field-level binding onto a builder.
///
/// Lets a format-agnostic driver write one named field at a time straight
/// into the builder's storage, without going through setters and without
/// materializing a complete value first. Fields that are never passed to
/// `merge_field` keep whatever the builder already holds.
pub trait FieldMerge {
    /// Names accepted by [`merge_field`](FieldMerge::merge_field), in
    /// declaration order.
    const FIELDS: &'static [&'static str];

    /// Deserializes `value` into the field called `name`.
    ///
    /// Returns `Ok(true)` when the field exists and was overwritten. For an
    /// unknown name the value is consumed and discarded and `Ok(false)` is
    /// returned, leaving the builder untouched.
    ///
    /// # Errors
    ///
    /// Propagates the deserializer's error when the value does not fit the
    /// field's type. The field keeps its previous content in that case.
    fn merge_field<'de, D>(&mut self, name: &str, value: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>;
}

/// Deserializes a complete record by filling an empty `B` and building it.
///
/// Used by the `Deserialize` impl that [`record!`](crate::record) generates,
/// and usable from a hand-written `Deserialize` impl for any builder pair.
/// Unknown keys are ignored and a repeated key keeps its last value.
///
/// # Errors
///
/// Fails with the deserializer's error when a value does not fit its field,
/// and with a custom error carrying the [`BuildError`](crate::BuildError)
/// message when a field is missing or the validation rule is violated.
pub fn deserialize_checked<'de, B, D>(deserializer: D) -> Result<B::Target, D::Error>
where
    B: Buildable + FieldMerge + Default,
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(BuilderVisitor::<B>(PhantomData))
}

struct BuilderVisitor<B>(PhantomData<B>);

impl<'de, B> Visitor<'de> for BuilderVisitor<B>
where
    B: Buildable + FieldMerge + Default,
{
    type Value = B::Target;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map with fields {}", B::FIELDS.join(", "))
    }

    fn visit_map<A>(self, mut map: A) -> Result<B::Target, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut builder = B::default();
        while let Some(key) = map.next_key::<String>()? {
            map.next_value_seed(NamedField {
                builder: &mut builder,
                name: &key,
            })?;
        }
        builder.build().map_err(<A::Error as de::Error>::custom)
    }
}

struct NamedField<'a, B> {
    builder: &'a mut B,
    name: &'a str,
}

impl<'de, B: FieldMerge> DeserializeSeed<'de> for NamedField<'_, B> {
    type Value = bool;

    fn deserialize<D>(self, deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        self.builder.merge_field(self.name, deserializer)
    }
}
