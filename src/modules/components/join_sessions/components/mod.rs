pub mod concat_list_fl;
