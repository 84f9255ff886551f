//! Built-in level maps
//!
//! Level maps are plain text, one row per line, using the symbols
//! `S` (snake head), `s` (snake body), `#` (wall), `O` (fruit), `.` (empty).

/// A 10x10 arena enclosed by walls
pub static CLASSIC_10: [&str; 10] = [
    "##########",
    "#........#",
    "#........#",
    "#........#",
    "#...S....#",
    "#........#",
    "#........#",
    "#........#",
    "#........#",
    "##########",
];

/// An open 8x8 board without walls, the edge of the board is deadly
pub static OPEN_8: [&str; 8] = [
    "........",
    "........",
    "........",
    "...S....",
    "........",
    "........",
    "........",
    "........",
];

/// A 12x12 arena with two inner wall segments
pub static PILLARS_12: [&str; 12] = [
    "############",
    "#..........#",
    "#..........#",
    "#..##..##..#",
    "#..........#",
    "#.....S....#",
    "#..........#",
    "#..........#",
    "#..##..##..#",
    "#..........#",
    "#..........#",
    "############",
];

/// Look up a built-in level by name
pub fn builtin(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "classic" => Some(&CLASSIC_10[..]),
        "open" => Some(&OPEN_8[..]),
        "pillars" => Some(&PILLARS_12[..]),
        _ => None,
    }
}

/// Names accepted by [`builtin`]
pub const BUILTIN_NAMES: [&str; 3] = ["classic", "open", "pillars"];

/// Split level text into rows, ignoring trailing whitespace and blank lines
pub fn parse_level_text(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
