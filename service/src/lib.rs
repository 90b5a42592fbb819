pub mod domain;
pub mod editor;
pub mod infrastructure;

#[cfg(test)]
mod test_utils;
