pub mod housing;
pub mod predict;
