pub mod csv_file;

pub use csv_file::{load_csv, save_csv};
