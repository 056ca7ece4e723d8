pub mod pending;

pub use pending::find_pending_leaves;
