pub mod locations;

pub use locations::load_locations;
