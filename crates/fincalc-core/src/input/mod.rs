pub mod fields;
pub mod normalize;

pub use fields::FieldSpec;
pub use normalize::{normalize, RawInput};
