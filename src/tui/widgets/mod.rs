pub mod daily;
pub mod header;
pub mod monthly;
pub mod next_prayer;
pub mod quotes;
pub mod statusbar;
