pub mod access;
pub mod scholarship_application;
pub mod tracking_code;
