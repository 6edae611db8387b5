pub mod components;
pub mod interface;
pub mod theme;

pub use components::{parse_position, position_label, Display};
pub use interface::GameInterface;
pub use theme::{Theme, ThemeManager};
