pub mod assets;
pub mod detail;
pub mod error;
pub mod export;
pub mod list;
pub mod request;
pub mod selection;
pub mod validate;

pub use error::CoreError;
pub use scrapedesk_store::{
    Company, CompanyId, DEFAULT_BASE_URL, HttpStore, RecordStore, StoreConfig, StoreError,
};

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
   ____                            _           _
  / ___|  ___ _ __ __ _ _ __   ___| |_ ___  __| | ___  ___| | __
  \___ \ / __| '__/ _` | '_ \ / _ \ __/ _ \/ _` |/ _ \/ __| |/ /
   ___) | (__| | | (_| | |_) |  __/ ||  __/ (_| |  __/\__ \   <
  |____/ \___|_|  \__,_| .__/ \___|\__\___|\__,_|\___||___/_|\_\
                       |_|
"#;
    println!("{}", banner.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "company records admin".bright_white(),
        concat!("v", env!("CARGO_PKG_VERSION")).dimmed()
    );
}
