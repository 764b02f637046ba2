pub mod list_mp4_files_fl;
