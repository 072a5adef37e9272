//! Station codes and landmark ids.
//!
//! Both are upper-case ASCII codes ("CBE", "LC101", "CURVE_CBE") held in an
//! `Arc<str>`, so resolver results can hand them out without copying.
//! Input is trimmed and upper-cased, which lets a lookup for "cbe " find
//! Coimbatore Junction.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

fn normalize(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if trimmed.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(trimmed.to_ascii_uppercase())
    } else {
        Cow::Borrowed(trimmed)
    }
}

macro_rules! catalog_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(code: impl AsRef<str>) -> Self {
                Self(normalize(code.as_ref()).into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <Cow<'de, str>>::deserialize(deserializer)?;
                Ok(Self::new(raw))
            }
        }
    };
}

catalog_code!(
    /// Indian Railways station code, e.g. `CBE`
    StationCode
);
catalog_code!(
    /// Catalog id of a trackside landmark, e.g. `LC101`
    LandmarkId
);
