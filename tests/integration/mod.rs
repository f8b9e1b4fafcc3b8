mod config_layers;
mod item_commands;
mod navigation;
mod parse_matrix;
mod verify_structure;
