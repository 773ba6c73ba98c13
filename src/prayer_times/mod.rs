pub mod next;

pub use next::next_prayer;
