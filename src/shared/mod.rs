pub mod constants;
pub mod listing;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
