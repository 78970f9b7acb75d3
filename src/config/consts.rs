// src/config/consts.rs

// Status resolution
pub const DEFAULT_HORIZON_DAYS: u32 = 14; // two weeks covers holiday breaks

// Tabular (column-per-meal) pages
pub const MEAL_COLUMNS: [&str; 4] = ["Breakfast", "Lunch", "Dinner", "Late Night"];
pub const TABULAR_MIN_CELLS: usize = 4;
pub const TABULAR_ICON_CELLS: usize = 6; // leading icon column shifts the name right

// Location-block (weekly hours widget) pages
pub const LIBRARY_BLOCK_MARKER: &str = "s-lc-whw";
pub const LIBRARY_LOC_CLASS: &str = "s-lc-whw-loc";
pub const LIBRARY_SUBLOC_CLASS: &str = "s-lc-whw-subloc";
pub const LIBRARY_MAIN_LABEL: &str = "Hours";
pub const NO_HOURS_MARK: &str = "-";
pub const CLOSED_TEXT: &str = "Closed";

// Services listed on a library detail page, in display order
pub const POWELL_SERVICES: [&str; 3] = ["Night Powell", "CLICC Classroom Hub", "Equipment Lending"];

// Logging
pub const LOG_FILE: &str = ".store/debug.log";
