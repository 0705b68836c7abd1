pub mod league;
pub mod rules;
