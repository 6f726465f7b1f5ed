use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::{Direction, OwnerType};
use crate::rules::load_rules;
use crate::settings::get_data_dir;

fn owner_label(owner: &OwnerType) -> &'static str {
    match owner {
        OwnerType::Person => "person",
        OwnerType::Property => "property",
        OwnerType::PvPlant => "pv_plant",
    }
}

pub fn list(json: bool) -> Result<()> {
    let rules = load_rules(&get_data_dir())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Category", "Owners", "Direction", "Patterns", "All?"]);
    for r in &rules {
        let owners: Vec<&str> = r.owner_types.iter().map(owner_label).collect();
        let direction = match r.direction {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        };
        table.add_row(vec![
            Cell::new(&r.rule_code),
            Cell::new(&r.category),
            Cell::new(owners.join(", ")),
            Cell::new(direction),
            Cell::new(r.patterns.join(", ")),
            Cell::new(if r.require_all_patterns { "yes" } else { "" }),
        ]);
    }
    println!("Rules ({} active)\n{table}", rules.len());
    Ok(())
}
