pub mod answer;
pub mod pause;
pub mod testing;
