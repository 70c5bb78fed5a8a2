pub mod decode;
mod pipeline;
pub mod source;
mod types;

pub use decode::{ImageCrateDecoder, RasterDecoder};
pub use pipeline::ImagePipeline;
#[cfg(feature = "http")]
pub use source::HttpFetcher;
pub use source::{FetchedBlob, Fetcher, ImageMime, ImageSource, NoFetcher, SourceKind};
pub use types::{ImageMetadata, LoadReporter, LoadStage, LoadedImage};
