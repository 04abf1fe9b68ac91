pub mod registry;
pub mod types;

pub use registry::DesignerRegistry;
pub use types::{Assessment, AssessmentPayload, Designer};
