pub mod headless;
pub mod human;

pub use headless::{HeadlessMode, HeadlessSummary};
pub use human::HumanMode;
