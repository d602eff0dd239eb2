pub mod envelope;
pub mod post;
