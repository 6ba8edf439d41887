pub mod feedback;
pub mod menu;
pub mod notice;
pub mod progress_bar;
pub mod sentence_panel;
pub mod syllable_board;
