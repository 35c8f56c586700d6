pub mod policy;

pub use policy::{GuidanceEvent, GuidanceFrame, GuidancePolicy};
