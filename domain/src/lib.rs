pub mod roles;
pub mod scholarship_application;
pub mod tracking_code;
