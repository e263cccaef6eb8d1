pub mod folder;
pub mod task;

pub use folder::*;
pub use task::*;
