mod candidate_batch;
mod outcome;
mod registry;
mod release;
mod repo_id;

pub use candidate_batch::*;
pub use outcome::*;
pub use registry::*;
pub use release::*;
pub use repo_id::*;
