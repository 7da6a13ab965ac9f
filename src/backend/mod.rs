//! Backend module - generation service contract, Replicate client, output parsing

pub mod output;
pub mod replicate;
pub mod traits;

pub use replicate::ReplicateClient;
pub use traits::{GenerationService, JobStatus, Prediction};
