use std::path::Path;

use crate::commands::common::{
    entry_to_list_item, format_entry_lines, open_controller, EntryListItem,
};
use crate::error::CliError;

pub fn run_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let controller = open_controller(db_path)?;
    let entries = controller.entries();

    if as_json {
        let json_items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| entry_to_list_item(index, entry))
            .collect::<Vec<EntryListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else {
        for line in format_entry_lines(entries) {
            println!("{line}");
        }
    }

    Ok(())
}
