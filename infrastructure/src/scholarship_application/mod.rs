pub mod scholarship_application_repository;
