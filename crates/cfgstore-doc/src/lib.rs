//! cfgstore document model
//!
//! Ordered configuration trees, dot-path navigation, and the YAML codec used
//! by the on-disk store.

pub mod codec;
pub mod path;
pub mod value;

pub use codec::{from_yaml, from_yaml_lenient, to_yaml, CodecError};
pub use path::KeyPath;
pub use value::{Document, Value};
