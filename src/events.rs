mod keyboard;
mod page;
mod pointer;

pub use keyboard::wire_skip_keys;
pub use page::wire_page_handlers;
pub use pointer::wire_input_handlers;
