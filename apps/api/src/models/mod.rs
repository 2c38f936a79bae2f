pub mod exclusion;
pub mod posting;
