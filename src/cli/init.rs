use std::path::PathBuf;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let conn = get_connection(&resolved.join("kontomatch.db"))?;
    init_db(&conn)?;

    println!("Initialized kontomatch at {}", resolved.display());
    println!();
    println!("Try these next:");
    println!("  kontomatch demo");
    println!("  kontomatch run --dry-run");
    Ok(())
}
