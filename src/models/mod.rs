pub mod astrologer;

pub use astrologer::{Astrologer, AstrologerRequest};
