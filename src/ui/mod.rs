pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, muted, section, status, success, warn};
pub use progress::{CopyProgress, Spinner};
pub use table::TableBuilder;
pub use theme::{theme, Theme};
