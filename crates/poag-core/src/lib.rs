pub mod error;
pub mod generate;
pub mod ir;
pub mod normalize;
pub mod openapi;
pub mod pipeline;
pub mod regression;
pub mod snapshot;

pub use generate::{GenerateOptions, generate};
pub use normalize::{NormalizeOptions, normalize};
pub use pipeline::{PipelineOptions, PipelineResult, SnapshotSource, run};
