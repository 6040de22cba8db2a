mod binary;
mod broadcast;

pub use binary::*;
