// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes

/// Returns a string slice truncated to at most `n` bytes, backing off to a
/// character boundary.
pub fn short(s: &str, n: usize) -> &str {
    if s.len() <= n {
        return s;
    }
    let mut end = n;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Define a `SmolStr` newtype ID.
///
/// `new()` mints a random ID of the form `{prefix}{nanoid}` (4 + 19
/// characters, which fits SmolStr's inline capacity). IDs supplied by
/// callers through `From<&str>`/`From<String>` carry no prefix requirement.
/// The type borrows as `str`, so maps keyed by it can be queried with
/// plain string slices.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct StepId("stp-");
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name($crate::smol_str::SmolStr);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Generate a new random ID with the type prefix
            pub fn new() -> Self {
                Self($crate::smol_str::SmolStr::new(format!(
                    "{}{}",
                    Self::PREFIX,
                    $crate::nanoid::nanoid!(19)
                )))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

crate::define_id! {
    /// Identity of a step within a pipeline.
    ///
    /// Results recorded in an execution context are keyed by this ID, so two
    /// steps sharing an ID overwrite each other's result.
    pub struct StepId("stp-");
}

crate::define_id! {
    /// Identity of the party that owns cached results.
    ///
    /// Used to scope `clear_cache`; capacity bounds are not per owner.
    pub struct OwnerId("own-");
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
