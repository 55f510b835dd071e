pub mod fixture_handler;
pub mod live_update_handler;
pub mod sync_handler;
