pub mod authentication;
pub mod scholarship;
