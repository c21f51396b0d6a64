mod feed_state;
mod history;
mod outcome;
mod sample;
mod view;

pub use feed_state::*;
pub use history::*;
pub use outcome::*;
pub use sample::*;
pub use view::*;
