pub mod designer;
pub mod footer;
pub mod help;
pub mod pool_map;
pub mod reference_view;
pub mod theme;
pub mod tools_view;
