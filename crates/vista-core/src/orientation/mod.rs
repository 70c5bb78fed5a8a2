pub mod code;
pub mod exif;
pub mod normalize;

pub use code::{OrientationCode, OrientationTransform};
pub use exif::{is_jpeg, parse_orientation};
pub use normalize::{normalize, normalize_inverse};
