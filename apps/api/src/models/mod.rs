pub mod company;
pub mod evaluation;
