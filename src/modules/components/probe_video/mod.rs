pub mod probe_video_fl;
