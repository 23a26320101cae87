pub mod assets;
pub mod audio;
pub mod config;
pub mod constants;
pub mod input;
pub mod prefs;
pub mod scene;
pub mod settings;
pub mod volume;

pub use audio::*;
pub use config::*;
pub use input::*;
pub use prefs::*;
pub use scene::*;
pub use settings::*;
pub use volume::*;
