//! Readers and writers for the on-disk data files.

pub mod cap_file;
pub mod controls_file;
pub mod eve_file;
pub mod mpd_file;
pub mod scantag_file;
pub mod text_writer;
pub mod tile_dictionary;
