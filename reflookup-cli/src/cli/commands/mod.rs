pub mod pick;
pub mod search;
pub mod serialize;

pub use pick::handle_pick_command;
pub use search::handle_search_command;
pub use serialize::handle_serialize_command;
