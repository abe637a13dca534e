//! Template CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::document::Transcoder;
use crate::template::{SectionMarker, TemplateSchema};

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List available templates
    List,

    /// Show the sections of a template
    Show {
        /// Template id
        id: String,
    },
}

pub fn run(cmd: TemplateCommands, transcoder: &Transcoder, output: &Output) -> Result<()> {
    match cmd {
        TemplateCommands::List => list_templates(transcoder, output),
        TemplateCommands::Show { id } => show_template(transcoder, output, &id),
    }
}

fn list_templates(transcoder: &Transcoder, output: &Output) -> Result<()> {
    let templates = transcoder.list_templates();

    if output.is_json() {
        let items: Vec<_> = templates
            .iter()
            .map(|t| {
                serde_json::json!({
                    "id": t.id,
                    "name": t.name,
                    "description": t.description,
                    "sections": t.sections.len(),
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<14} {:<9} DESCRIPTION", "ID", "SECTIONS");
        println!("{}", "-".repeat(70));
        for t in templates {
            println!("{:<14} {:<9} {}", t.id, t.sections.len(), t.description);
        }
    }

    Ok(())
}

fn show_template(transcoder: &Transcoder, output: &Output, id: &str) -> Result<()> {
    let template = transcoder.registry().require(id)?;

    if output.is_json() {
        output.data(template);
        return Ok(());
    }

    println!("Template: {} ({})", template.id, template.name);
    println!("{}", template.description);
    if template.synthesizes_metadata {
        println!("Generated documents always carry a metadata block.");
    }
    println!();
    print_sections(template);

    Ok(())
}

fn print_sections(template: &TemplateSchema) {
    for spec in &template.sections {
        let located_by = match spec.marker {
            SectionMarker::Title => "# <title>".to_string(),
            SectionMarker::Heading(heading) => heading.to_string(),
            SectionMarker::Clause(keyword) => format!("{} ...", keyword),
            SectionMarker::Body => "(whole body)".to_string(),
        };
        let required = if spec.required { "required" } else { "optional" };

        println!("{:<14} {:<10} {:<9} {}", spec.id, format!("{:?}", spec.kind).to_lowercase(), required, located_by);
        for line in spec.placeholder.lines() {
            println!("{:<14} {}", "", line);
        }
    }
}
