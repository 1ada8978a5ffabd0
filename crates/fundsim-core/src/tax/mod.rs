pub mod bracket;
pub mod succession;
