pub mod diff;
pub mod install;
pub mod status;
