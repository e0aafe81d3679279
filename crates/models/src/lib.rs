pub mod errors;
pub mod db;
pub mod group;
pub mod user;

#[cfg(test)]
mod tests;
