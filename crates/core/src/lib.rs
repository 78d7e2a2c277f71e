pub mod block;
pub mod clean;
pub mod config;
pub mod diversity;
pub mod error;
pub mod extract;
pub mod optimizer;
pub mod parse;
pub mod preprocess;
pub mod quality;
pub mod reassemble;
pub mod report;
pub mod retain;
pub mod score;
pub mod tokenize;
pub mod vectorize;

pub use block::Block;
pub use config::{OptimizeConfig, OptimizeConfigBuilder};
pub use error::{CribroError, Result};
pub use optimizer::{ContentExtractor, Optimizer, RequestMeta, optimize};
pub use report::{Outcome, Report, StageCounts, TopBlock};
pub use tokenize::Segmenter;
#[doc(hidden)]
pub use clean::clean_blocks;
#[doc(hidden)]
pub use extract::extract_blocks;
#[doc(hidden)]
pub use parse::Document;
#[doc(hidden)]
pub use preprocess::strip_noise;
#[doc(hidden)]
pub use score::{Scored, score_blocks};
#[doc(hidden)]
pub use vectorize::{SparseVec, TfidfSpace, cosine};
