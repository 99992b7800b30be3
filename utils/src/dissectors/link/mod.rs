pub mod ethernet;
pub mod gsw1xx;
