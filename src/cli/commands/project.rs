use super::{open_db, page_from, print_page_footer};
use crate::cli::parser::ProjectAction;
use crate::config::Config;
use crate::core::ProjectService;
use crate::errors::{AppError, AppResult};
use crate::models::{Client, Project, ProjectFilter};
use crate::ui::messages::{detail, success, warning};
use crate::utils::table::Table;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("project {id}"))
}

fn print_project(project: &Project, client: Option<&Client>) {
    detail("id", project.id);
    detail("name", &project.name);
    let client = match (project.client_id, client) {
        (Some(_), Some(c)) => format!("#{} {}", c.id, c.name),
        (Some(id), None) => format!("#{id}"),
        (None, _) => String::new(),
    };
    detail("client", client);
    detail("description", project.description.as_deref().unwrap_or(""));
}

pub fn handle(action: &ProjectAction, cfg: &Config) -> AppResult<()> {
    let mut db = open_db(cfg)?;
    let service = ProjectService::new();

    match action {
        ProjectAction::Add {
            name,
            client,
            description,
        } => {
            let mut project = Project::new(name.as_str());
            project.client_id = *client;
            project.description = description.clone();
            db.with_transaction(|tx| service.save(tx, &mut project))?;
            success(format!("Project #{} added.", project.id));
        }

        ProjectAction::New { client } => {
            let mut project = service.new_template();
            project.client_id = *client;
            db.with_transaction(|tx| service.save(tx, &mut project))?;
            success(format!("Project #{} \"{}\" created.", project.id, project.name));
        }

        ProjectAction::Update {
            id,
            name,
            client,
            description,
        } => {
            let project = db.with_transaction(|tx| {
                let mut project = service.get_by_id(tx, *id)?.ok_or_else(|| not_found(*id))?;
                if let Some(name) = name {
                    project.name = name.clone();
                }
                if client.is_some() {
                    project.client_id = *client;
                }
                if let Some(description) = description {
                    project.description = Some(description.clone());
                }
                service.save(tx, &mut project)?;
                Ok(project)
            })?;
            success(format!("Project #{} updated.", project.id));
        }

        ProjectAction::Get { id } => {
            let (project, client) = db.with_transaction(|tx| {
                let project = service.get_by_id(tx, *id)?.ok_or_else(|| not_found(*id))?;
                let client = service.client_of(tx, &project)?;
                Ok((project, client))
            })?;
            print_project(&project, client.as_ref());
        }

        ProjectAction::List {
            name,
            client,
            description,
            page,
        } => {
            let filter = ProjectFilter {
                id: None,
                name: name.clone(),
                client_id: *client,
                description: description.clone(),
            };
            let page = page_from(page, cfg);
            let result = db.with_transaction(|tx| service.get_all(tx, &filter, &page))?;

            if result.is_empty() {
                warning("No projects found.");
                return Ok(());
            }

            let mut table = Table::new(["id", "name", "client", "description"]);
            for p in &result.items {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.client_id.map(|c| c.to_string()).unwrap_or_default(),
                    p.description.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
            print_page_footer(&result, "project");
        }

        ProjectAction::Delete { id } => {
            db.with_transaction(|tx| service.delete(tx, *id))?;
            success(format!("Project #{id} deleted."));
        }
    }

    Ok(())
}
