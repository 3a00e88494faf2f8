//! Validated string newtypes.
//!
//! Table names, object-store locations and role ARNs are plain strings in
//! generated SQL but each has a shape it must have. The macro below ties the
//! shape to the type so an invalid value can't be constructed.

/// Define a string newtype whose values satisfy `valid`.
///
/// `expected` describes the accepted shape and ends up in the panic and
/// deserialization messages. Generates `new()` (panics on invalid input),
/// `try_new()`, `as_str()`, `into_inner()`, a transparent `Serialize`, a
/// validating `Deserialize`, and `Display` / `AsRef<str>` / `Deref` /
/// `PartialEq<str>` / `PartialEq<&str>`.
macro_rules! define_newtype_string {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident: $expected:literal where $valid:expr;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            /// Accepted shape, for error messages
            pub const EXPECTED: &'static str = $expected;

            /// Whether `value` is an acceptable value
            pub fn is_valid(value: &str) -> bool {
                let check: fn(&str) -> bool = $valid;
                !value.is_empty() && check(value)
            }

            /// Wrap a value known to be valid.
            ///
            /// # Panics
            ///
            /// When the value is invalid; use [`try_new`](Self::try_new) for
            /// untrusted input.
            pub fn new(value: impl Into<String>) -> Self {
                let value = value.into();
                match Self::try_new(value.as_str()) {
                    Some(wrapped) => wrapped,
                    None => panic!(
                        "{} must be {}, got '{}'",
                        stringify!($Name),
                        $expected,
                        value
                    ),
                }
            }

            /// Wrap a value, or `None` when it is invalid
            pub fn try_new(value: impl Into<String>) -> Option<Self> {
                let value = value.into();
                Self::is_valid(&value).then_some(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl<'de> serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                $Name::try_new(value).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($Name), " must be ", $expected))
                })
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $Name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $Name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $Name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

pub(crate) use define_newtype_string;
