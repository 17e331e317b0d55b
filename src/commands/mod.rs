pub mod locks;
pub mod prefs;
pub mod refresh;
pub mod render;

pub use locks::*;
pub use prefs::*;
pub use refresh::*;
pub use render::*;
