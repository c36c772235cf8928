// Service exports
pub mod artifact;

pub use artifact::{ArtifactError, ArtifactSpec, ModelArtifact, Regressor, RegressionTree, TreeNode};
