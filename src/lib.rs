mod beatmap;
mod classifier;
mod compensator;
mod error;
mod estimator;
mod model;
mod normalizer;
mod util;

pub use beatmap::*;
pub use classifier::*;
pub use compensator::*;
pub use error::{Result as SvResult, SvError};
pub use estimator::*;
pub use model::config::*;
pub use model::timing::*;
pub use normalizer::*;
pub use util::*;
