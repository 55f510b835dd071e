pub mod fixture_helpers;
pub mod football_api_mock;
pub mod utils;
