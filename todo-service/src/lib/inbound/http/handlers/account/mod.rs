pub mod delete_me;
pub mod get_me;
pub mod update_me;

pub use delete_me::delete_me;
pub use get_me::get_me;
pub use update_me::update_me;
