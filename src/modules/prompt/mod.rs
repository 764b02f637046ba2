pub mod prompt_folder_fl;
