pub mod access;
pub mod scholarship_application;
pub mod tracking_code;

#[cfg(test)]
mod test_support;
