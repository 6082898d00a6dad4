pub mod bootstrap;
pub mod password;
pub mod test_utils;
