//! Class listing command

use super::Sources;
use crate::error::CliResult;
use apiscope_core::{SourceModel, SpringRequestExporter};
use colored::Colorize;

/// List the classes of the model, marking controllers
pub fn execute(sources: &Sources) -> CliResult<()> {
    let exporter = SpringRequestExporter::new(sources.model.clone());
    let classes = sources.model.classes();

    if classes.is_empty() {
        println!("No classes found.");
        return Ok(());
    }

    let mut controllers = 0;
    for class in &classes {
        if exporter.is_controller(class) {
            controllers += 1;
            let handlers = sources
                .model
                .methods_of(class)
                .iter()
                .filter(|m| exporter.is_handler_method(m))
                .count();
            println!("{} {} ({} handlers)", "●".green(), class, handlers);
        } else {
            println!("{} {}", "○".dimmed(), class.to_string().dimmed());
        }
    }

    println!();
    println!("Classes: {}, controllers: {}", classes.len(), controllers);
    Ok(())
}
