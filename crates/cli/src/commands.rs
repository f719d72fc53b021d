pub mod list;
pub mod paths;
pub mod plan;
pub mod run;
pub mod schema;
