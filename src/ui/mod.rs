pub mod icons;
pub mod output;
pub mod theme;

pub use icons::Icons;
pub use output::{backlog_row, detail, header, info, reply, section};
pub use theme::{theme, Theme};
