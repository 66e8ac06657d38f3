pub mod file;
pub mod seed;
pub mod traits;

pub use file::FileScheduleRepository;
pub use seed::import_seed;
pub use traits::ScheduleRepository;
