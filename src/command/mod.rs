mod bisect;

pub use bisect::run_bisect;
