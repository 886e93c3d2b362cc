mod issue;

pub use issue::{deserialize_optional_date, Issue, IssueStatus, Priority};
