//! Dynamic value model and variant wire codec for device command transport.
//!
//! This crate defines the two value representations that cross the device
//! daemon's process boundary and the codec between them:
//!
//! - [`ValueKind`] — closed kind discriminator over [`serde_json::Value`],
//!   the dynamically-typed tree used for manifests, schemas, and serialized
//!   command state.
//! - [`Variant`] — the type-erased wire value exchanged with the IPC
//!   transport, with [`VariantDictionary`] as the boundary map type.
//! - [`encode_value`] / [`encode_dictionary`] and [`decode_variant`] /
//!   [`decode_dictionary`] — the bidirectional codec, enforcing strict
//!   list homogeneity on encode and a fixed probe precedence on decode.
//!
//! # Example
//!
//! ```
//! use device_commands_core::{decode_dictionary, encode_dictionary, Variant};
//! use serde_json::json;
//!
//! let state = json!({"on": true, "brightness": 128});
//! let Some(object) = state.as_object() else { unreachable!() };
//!
//! let wire = encode_dictionary(object).unwrap();
//! assert_eq!(wire.get("on"), Some(&Variant::Bool(true)));
//!
//! let restored = decode_dictionary(&wire).unwrap();
//! assert_eq!(&restored, object);
//! ```

mod codec;
mod error;
mod value;
mod variant;

pub use codec::{decode_dictionary, decode_variant, encode_dictionary, encode_value};
pub use error::{CodecError, Result};
pub use value::ValueKind;
pub use variant::{Variant, VariantDictionary};
