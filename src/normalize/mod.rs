pub mod abbreviations;
pub mod reader;
pub mod render;
pub mod rows;

pub use abbreviations::*;
pub use reader::*;
pub use render::*;
pub use rows::*;
