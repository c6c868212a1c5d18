//! Request payloads, nested references and response views.
//!
//! Payload fields are all optional so the same type serves create (where
//! `required` rules reject missing keys) and partial update (where the
//! handler fills the key from the stored row before validating).

pub mod country;
pub mod grape;
pub mod producer;
pub mod region;
pub mod user;
pub mod wine;
pub mod wine_type;

use garde::Validate;
use serde::{Deserialize, Serialize};

pub use country::{CountryPayload, CountryView};
pub use grape::{GrapePayload, GrapeView};
pub use producer::{ProducerPayload, ProducerView};
pub use region::{RegionPayload, RegionView};
pub use user::{Credentials, RegisterPayload, UserView};
pub use wine::{WinePayload, WineView};
pub use wine_type::{WineTypePayload, WineTypeView};

/// Nested `{"name": ...}` reference to a country
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CountryRef {
    #[garde(required, length(min = 1, max = 64))]
    pub name: Option<String>,
}

/// Nested `{"name": ...}` reference to a region
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegionRef {
    #[garde(required, length(min = 1, max = 128))]
    pub name: Option<String>,
}

/// Nested `{"name": ...}` reference to a producer
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProducerRef {
    #[garde(required, length(min = 1, max = 128))]
    pub name: Option<String>,
}

/// Nested `{"name": ...}` reference to a grape
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GrapeRef {
    #[garde(required, length(min = 1, max = 64))]
    pub name: Option<String>,
}

/// Nested `{"type": ...}` reference to a wine type
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WineTypeRef {
    #[serde(rename = "type")]
    #[garde(required, length(min = 1, max = 64))]
    pub kind: Option<String>,
}

/// Business key carried by a nested reference, if the client sent one
pub trait NestedKey {
    fn nested_key(&self) -> Option<&str>;
}

macro_rules! nested_by_name {
    ($($ty:ty),*) => {
        $(impl NestedKey for $ty {
            fn nested_key(&self) -> Option<&str> {
                self.name.as_deref()
            }
        })*
    };
}

nested_by_name!(CountryRef, RegionRef, ProducerRef, GrapeRef);

impl NestedKey for WineTypeRef {
    fn nested_key(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

/// Key of an optional nested reference
pub fn key_of<R: NestedKey>(reference: &Option<R>) -> Option<&str> {
    reference.as_ref().and_then(NestedKey::nested_key)
}

/// Related entity as it appears inside a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameRef {
    pub name: String,
}

impl From<String> for NameRef {
    fn from(name: String) -> Self {
        Self { name }
    }
}

/// Related wine type as it appears inside a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<String> for TypeRef {
    fn from(kind: String) -> Self {
        Self { kind }
    }
}
