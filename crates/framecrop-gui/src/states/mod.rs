mod ui;
mod viewport;

pub use ui::{Task, UIState};
pub use viewport::ViewState;
