pub mod ascii;
pub mod avatar;
pub mod bits;
pub mod color;
pub mod config;
pub mod digest;
pub mod display;
pub mod error;
pub mod raster;
pub mod sheet;
pub mod walk;

pub use ascii::AsciiStyle;
pub use avatar::Bvatar;
pub use bits::{BitCursor, Discipline, Exhausted};
pub use color::{HueSat, derive_hue_sat, hls_to_rgb};
pub use config::Config;
pub use digest::Digest;
pub use error::{Error, Result};
pub use raster::{RasterStyle, encode_png};
pub use sheet::ContactSheet;
pub use walk::{Atrium, Axis, Gait, Termination, WalkConfig, walk};
