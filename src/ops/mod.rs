pub mod alarm_ops;
pub mod check;
pub mod ids;
pub mod list_ops;
pub mod project_ops;
pub mod reorder;
pub mod search;
pub mod stats;
pub mod task_ops;
