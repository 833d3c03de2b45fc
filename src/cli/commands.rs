pub mod initdb;
pub mod report;
pub mod roll_forward;

pub use initdb::init_database;
pub use report::generate_report;
pub use roll_forward::roll_forward;
