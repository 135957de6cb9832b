mod extractor;
mod reconciler;

pub use extractor::*;
pub use reconciler::*;
