//! Local persistence layer

pub mod db;
pub mod normalize;

// Re-exports for library consumers
pub use db::{
    CompanyGroup, Database, ImportOutcome, NewConnection, PeopleFilter, Person,
    DEFAULT_EMPLOYEE_THRESHOLD,
};
