pub mod database;
pub mod scholarship_application;
pub mod tracking_code;
