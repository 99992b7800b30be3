#[macro_use]
extern crate enum_primitive_derive;
#[macro_use]
extern crate log;

pub mod dissectors;
