pub mod group_files_fl;
