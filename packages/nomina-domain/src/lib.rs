pub mod criteria;
pub mod fetch;
pub mod pagination;
pub mod person;

pub use criteria::{InstitutionCriteria, LastNameCriteria, RelatedCriteria, RelatedKind};
pub use fetch::{FetchBatch, FetchPolicy, FetchRequest};
pub use pagination::PaginationSummary;
pub use person::{PersonSummary, SubjectPerson, surnames_equal};
