pub mod assess;
pub mod options;
pub mod portfolio;
pub mod schema;
