pub mod answers;
pub mod quiz;
pub mod result;
pub mod settings;
