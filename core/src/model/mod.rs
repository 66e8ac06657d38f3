pub mod goal;
pub mod history;
pub mod schedule;
pub mod timer;
