pub mod cli;
pub mod inspect;
pub mod serve;
