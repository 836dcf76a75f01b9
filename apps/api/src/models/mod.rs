pub mod candidate;

pub use candidate::{CandidateRecord, SocialKind};
