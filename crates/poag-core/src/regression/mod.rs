pub mod baselines;
pub mod summary;

pub use baselines::{ArtifactBaseline, ArtifactBaselines, ArtifactId, load_baselines};
pub use summary::{ArtifactState, RegressionParity, RegressionSummary, compute_summary};
