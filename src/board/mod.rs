//! Lights Out board, press rules and file I/O

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::Board;
pub use io::{create_example_boards, load_board_from_file, load_boards_from_directory, save_board_to_file};
pub use rules::LightsOutRules;
