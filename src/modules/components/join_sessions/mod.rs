pub mod components;
pub mod join_mp4_files_fl;
