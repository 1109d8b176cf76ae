/// Declares an immutable record together with its builder.
///
/// The macro emits:
/// - the record struct, with private fields and one `&T` accessor per field,
///   a canonical constructor `new`, `builder()` and `into_builder()`;
/// - the builder struct (`Debug`, `Clone`, `Default`) holding every field as
///   an optional slot, with one chaining setter per field and `is_set`;
/// - [`Buildable`](crate::Buildable), [`ToBuilder`](crate::ToBuilder) and
///   [`FieldMerge`](crate::FieldMerge) impls wiring the two together;
/// - a serde `Deserialize` impl for the record that fills an empty builder
///   and builds it (see [`deserialize_checked`](crate::deserialize_checked)).
///
/// Attributes on the struct and its fields are forwarded to the record only.
/// Every field type must be `Clone + Debug + Deserialize`. All fields are
/// required by `build`; use an `Option<T>` field for optional data.
///
/// An optional `validate = path;` clause names a
/// `fn(&Record) -> BuildResult<()>` that runs on every construction path:
/// `build`, `new` and deserialization. With a rule, `new` returns
/// `BuildResult<Self>`; without one it returns `Self`. Either way no record
/// can exist that its own builder would refuse.
///
/// Do not derive `Deserialize` on the record; the generated impl conflicts
/// with it. Field-level deserialize attributes such as `#[serde(default)]`
/// have no effect, since every field goes through the builder.
///
/// # Reserved names
///
/// Fields become methods on both the record and the builder, so a field may
/// not be called `new`, `builder`, `into_builder` or `is_set`. Such a field
/// fails to compile with a duplicate definition error.
///
/// ```
/// use patchwork_builder::{record, BuildError, BuildResult, Buildable, ToBuilder};
///
/// fn positive_id(user: &User) -> BuildResult<()> {
///     if *user.id() > 0 {
///         Ok(())
///     } else {
///         Err(BuildError::validation("positive_id", "id must be > 0"))
///     }
/// }
///
/// record! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct User => UserBuilder {
///         id: i32,
///         name: String,
///     }
///     validate = positive_id;
/// }
///
/// let user = User::new(1, "ann".to_string()).unwrap();
/// let renamed = user.to_builder().name("bob".to_string()).build().unwrap();
/// assert_eq!(renamed.name(), "bob");
/// assert_eq!(user.to_builder().build().unwrap(), user);
/// assert!(user.to_builder().id(0).build().is_err());
/// assert!(User::new(0, "nobody".to_string()).is_err());
/// ```
///
/// ```compile_fail
/// use patchwork_builder::record;
///
/// record! {
///     pub struct Clash => ClashBuilder {
///         is_set: bool,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (@new $vis:vis fn ($($field:ident : $ty:ty),+) $validator:path) => {
        /// Creates the record from all of its fields and runs its validation
        /// rule.
        ///
        /// # Errors
        ///
        /// Returns `BuildError::Validation` when the rule rejects the fields.
        #[allow(clippy::too_many_arguments)]
        $vis fn new($($field: $ty),+) -> $crate::BuildResult<Self> {
            let record = Self { $($field),+ };
            $validator(&record)?;
            ::core::result::Result::Ok(record)
        }
    };
    (@new $vis:vis fn ($($field:ident : $ty:ty),+)) => {
        /// Creates the record from all of its fields.
        #[allow(clippy::too_many_arguments)]
        #[must_use]
        $vis fn new($($field: $ty),+) -> Self {
            Self { $($field),+ }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $builder:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),+ $(,)?
        }
        $(validate = $validator:path;)?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field: $ty,
            )+
        }

        impl $name {
            $crate::record!(@new $vis fn ($($field: $ty),+) $($validator)?);

            /// Returns an empty builder with no field set.
            #[must_use]
            $vis fn builder() -> $builder {
                <$builder as ::core::default::Default>::default()
            }

            /// Converts this record into a builder without cloning its fields.
            #[must_use]
            $vis fn into_builder(self) -> $builder {
                $builder {
                    $($field: ::core::option::Option::Some(self.$field),)+
                }
            }

            $(
                #[must_use]
                $vis fn $field(&self) -> &$ty {
                    &self.$field
                }
            )+
        }

        #[doc = ::core::concat!("Builder for [`", ::core::stringify!($name), "`].")]
        #[derive(Debug, Clone, Default)]
        $vis struct $builder {
            $($field: ::core::option::Option<$ty>,)+
        }

        impl $builder {
            $(
                #[must_use]
                $vis fn $field(mut self, value: $ty) -> Self {
                    self.$field = ::core::option::Option::Some(value);
                    self
                }
            )+

            /// Whether the field called `name` currently holds a value.
            #[must_use]
            $vis fn is_set(&self, name: &str) -> bool {
                $(
                    if name == ::core::stringify!($field) {
                        return self.$field.is_some();
                    }
                )+
                false
            }
        }

        impl $crate::Buildable for $builder {
            type Target = $name;

            fn build(&self) -> $crate::BuildResult<$name> {
                let record = match ($(self.$field.as_ref(),)+) {
                    ($(::core::option::Option::Some($field),)+) => $name {
                        $($field: ::core::clone::Clone::clone($field),)+
                    },
                    _ => {
                        let mut missing = ::std::vec::Vec::new();
                        $(
                            if self.$field.is_none() {
                                missing.push(::core::stringify!($field));
                            }
                        )+
                        return ::core::result::Result::Err(
                            $crate::BuildError::MissingFields(missing),
                        );
                    }
                };
                $($validator(&record)?;)?
                ::core::result::Result::Ok(record)
            }
        }

        impl $crate::ToBuilder for $name {
            type Builder = $builder;

            fn to_builder(&self) -> $builder {
                $builder {
                    $(
                        $field: ::core::option::Option::Some(
                            ::core::clone::Clone::clone(&self.$field),
                        ),
                    )+
                }
            }
        }

        impl $crate::FieldMerge for $builder {
            const FIELDS: &'static [&'static str] = &[$(::core::stringify!($field)),+];

            fn merge_field<'de, D>(
                &mut self,
                name: &str,
                value: D,
            ) -> ::core::result::Result<bool, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $(
                    if name == ::core::stringify!($field) {
                        let parsed =
                            <$ty as $crate::__private::serde::Deserialize>::deserialize(value)?;
                        self.$field = ::core::option::Option::Some(parsed);
                        return ::core::result::Result::Ok(true);
                    }
                )+
                <$crate::__private::serde::de::IgnoredAny as $crate::__private::serde::Deserialize>::deserialize(value)?;
                ::core::result::Result::Ok(false)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                $crate::deserialize_checked::<$builder, D>(deserializer)
            }
        }
    };
}
