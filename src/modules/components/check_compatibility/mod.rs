pub mod check_compatibility_fl;
