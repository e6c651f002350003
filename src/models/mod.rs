//! # Data Models
//!
//! The data layer. `Task` is the sole entity; its model carries both the
//! row mapping and the mutation engine (create / update / delete) so that
//! every storage write goes through one translated, transactional path.

pub mod task;

pub use task::{
    NewTask, Task, TaskPage, TaskPageQuery, TaskStatus, TaskUpdate, TaskUpdatePartial,
};
