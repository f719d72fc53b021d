//! Configuration parsing for `covtask.yml` and the tasks it declares

pub mod project;
pub mod tasks;
