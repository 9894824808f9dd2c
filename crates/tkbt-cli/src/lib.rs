pub mod commands;
pub mod pos;
pub mod table;
pub mod trace_init;
