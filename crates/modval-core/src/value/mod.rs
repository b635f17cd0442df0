//! Property values: the host's serialized form and its normalized model.
//!
//! ## Entry point
//!
//! ```
//! use modval_core::value::{Normalizer, PropertyValue, RawValue};
//!
//! let raw = RawValue::new("SDValueFloat2", "SDValueFloat2(float2(0.17365,0.3249))");
//! let value = Normalizer::new(2).normalize(&raw, false).unwrap();
//! assert_eq!(value, PropertyValue::FloatPair(["0.17".into(), "0.32".into()]));
//! ```

pub mod model;
pub mod normalize;

pub use model::{Enumerator, PropertyValue, RawValue, ValueKind};
pub use normalize::{decode_enum_index, round_component, title_case, Normalizer};
