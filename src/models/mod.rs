pub mod campsite;
pub mod favorites;
pub mod partner;
pub mod user;

pub use campsite::*;
pub use favorites::*;
pub use partner::*;
pub use user::*;
