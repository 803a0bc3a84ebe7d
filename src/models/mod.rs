pub mod meeting;

pub use meeting::{ColorTag, Meeting};
