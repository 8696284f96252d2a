//! Entity structs for ZenFocus domain objects.
//!
//! Each entity maps to a record in the remote `tasks` collection.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod task;

pub use task::{NewTask, Task};
