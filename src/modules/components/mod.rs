pub mod check_compatibility;
pub mod group_files;
pub mod join_sessions;
pub mod list_mp4_files;
pub mod probe_video;
