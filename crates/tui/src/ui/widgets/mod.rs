pub mod hints;
pub mod stepped_bar;

pub use hints::draw_hints;
pub use stepped_bar::{SteppedBar, render_to_text, step_at, terminal_defaults};
