pub mod diagnosis;
pub mod lead;
pub mod wizard;
