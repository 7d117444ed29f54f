pub mod commands;
pub mod handlers;

// Re-export commonly used pieces for convenience
pub use commands::{CLAP_STYLING, command_argument_builder};
pub use handlers::{
    export_destination, expand_path, handle_delete, handle_export, handle_list, handle_scrape,
    handle_show, handle_ui, store_config,
};
