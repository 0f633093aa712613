//! Request export command

use super::Sources;
use crate::error::{CliError, CliResult};
use apiscope_core::{ClassRef, ConfigRules, InMemoryModel, Request, SpringRequestExporter};
use clap::ValueEnum;
use colored::Colorize;
use std::sync::Arc;
use tracing::debug;

/// Output format of exported requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One line per request
    Table,
}

impl OutputFormat {
    fn from_settings(format: Option<&str>) -> CliResult<Option<Self>> {
        format
            .map(|f| {
                OutputFormat::from_str(f, true)
                    .map_err(|_| CliError::InvalidArgument(format!("unknown output format: {}", f)))
            })
            .transpose()
    }
}

/// Rules from the configuration come first so their literals win; boolean
/// rules OR over both sources.
pub fn build_rules(sources: &Sources) -> ConfigRules<Arc<InMemoryModel>> {
    let mut rules = ConfigRules::new(sources.model.clone());
    if let Some(table) = sources.config.lookup("rules") {
        rules.extend_from_value(&table);
    }
    rules.extend_from_value(&sources.settings.rules_value());
    rules
}

/// Export requests of one class or of all classes.
pub fn collect(sources: &Sources, class: Option<&str>) -> CliResult<Vec<Request>> {
    let rules = build_rules(sources);
    debug!(empty = rules.is_empty(), "Built rules");
    let exporter = SpringRequestExporter::with_rules(sources.model.clone(), rules);

    match class {
        Some(name) => {
            let class = ClassRef::new(name);
            if sources.model.class(&class).is_none() {
                return Err(CliError::InvalidArgument(format!("no class named {}", name)));
            }
            Ok(exporter.export_class(&class))
        }
        None => Ok(exporter.export_all()),
    }
}

/// Export command
pub fn execute(
    sources: &Sources,
    class: Option<&str>,
    format: Option<OutputFormat>,
) -> CliResult<()> {
    let format = match format {
        Some(format) => format,
        None => OutputFormat::from_settings(sources.settings.format.as_deref())?
            .unwrap_or(OutputFormat::Json),
    };

    let requests = collect(sources, class)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&requests)?),
        OutputFormat::Table => print_requests_table(&requests),
    }

    Ok(())
}

fn names<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn describe_params(request: &Request) -> Vec<String> {
    let mut lines = Vec::new();

    if !request.path_params.is_empty() {
        let path = names(request.path_params.iter().map(|p| p.name.as_str()));
        lines.push(format!("path: {}", path));
    }
    if !request.query_params.is_empty() {
        let query = names(request.query_params.iter().map(|p| p.name.as_str()));
        lines.push(format!("query: {}", query));
    }
    if !request.form_params.is_empty() {
        let form = names(request.form_params.iter().map(|p| p.name.as_str()));
        lines.push(format!("form: {}", form));
    }
    if !request.headers.is_empty() {
        let headers = names(request.headers.iter().map(|h| h.name.as_str()));
        lines.push(format!("headers: {}", headers));
    }
    if let Some(body) = &request.body {
        lines.push(format!("body: {}", serde_json::to_string(&body.ty).unwrap_or_default()));
    }
    lines
}

fn print_requests_table(requests: &[Request]) {
    if requests.is_empty() {
        println!("No requests found.");
        return;
    }

    let method_width = 7;
    let path_width = requests.iter().map(|r| r.path.len()).max().unwrap_or(4).max(4);

    println!("{:mw$}  {:pw$}  NAME", "METHOD", "PATH", mw = method_width, pw = path_width);
    println!("{}", "-".repeat(method_width + path_width + 10));

    for request in requests {
        let method = request
            .method
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {:pw$}  {}",
            format!("{:mw$}", method, mw = method_width).green().bold(),
            request.path,
            request.name.dimmed(),
            pw = path_width
        );
        for line in describe_params(request) {
            println!("  └─ {}", line);
        }
    }

    println!();
    println!("Total requests: {}", requests.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiscope_config::{ConfigManager, Settings};
    use apiscope_core::{ClassDecl, MethodDecl, ParamDecl};
    use serde_json::json;

    fn sources() -> Sources {
        let model = InMemoryModel::new().with_class(
            ClassDecl::new("com.example.ItemController")
                .annotate("RestController", json!({}))
                .annotate("RequestMapping", json!("/items"))
                .method(
                    MethodDecl::new("list")
                        .annotate("GetMapping", json!({}))
                        .param(
                            ParamDecl::new("page", "int")
                                .annotate("RequestParam", json!({"required": false})),
                        ),
                ),
        );
        Sources {
            model: Arc::new(model),
            settings: Settings::default(),
            config: ConfigManager::new(),
        }
    }

    #[test]
    fn test_collect_all() {
        let requests = collect(&sources(), None).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/items");
    }

    #[test]
    fn test_collect_unknown_class() {
        let err = collect(&sources(), Some("com.example.Missing")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[test]
    fn test_config_rules_win_over_settings() {
        let mut sources = sources();
        sources
            .config
            .set("rules", json!({"class.prefix.path": "/config"}))
            .unwrap();
        sources.settings.rules = json!({"class.prefix.path": "/settings", "param.required": true})
            .as_object()
            .cloned()
            .unwrap_or_default();

        let requests = collect(&sources, None).unwrap();
        assert_eq!(requests[0].path, "/config/items");
        assert!(requests[0].query_params[0].required);
    }

    #[test]
    fn test_format_from_settings() {
        assert_eq!(OutputFormat::from_settings(Some("TABLE")).unwrap(), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_settings(None).unwrap(), None);
        assert!(OutputFormat::from_settings(Some("yaml")).is_err());
    }

    #[test]
    fn test_describe_params() {
        let requests = collect(&sources(), None).unwrap();
        assert_eq!(describe_params(&requests[0]), vec!["query: page".to_string()]);
    }
}
