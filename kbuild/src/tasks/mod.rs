pub mod script;
pub mod tooling;
