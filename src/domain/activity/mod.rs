pub mod entity;
pub mod keyword;
pub mod presets;
pub mod query;
pub mod repository;
pub mod value_objects;

pub use entity::{Activity, ActivityDraft, ActivityUpdate, ClientSnapshot, NewActivity, UserSnapshot};
pub use keyword::Keyword;
pub use presets::{DateRange, DateRangePreset};
pub use query::{
    ActivityFilter, ActivityQuery, Condition, OrderClause, OrderField, SortDirection, SortField,
    SortSpec,
};
pub use repository::ActivityRepository;
pub use value_objects::{
    ActivityId, ActivityStatus, ContactMethod, Direction, Priority, StatusTone, Subject,
};
