use super::{open_db, page_from, print_page_footer};
use crate::cli::parser::ClientAction;
use crate::config::Config;
use crate::core::ClientService;
use crate::errors::{AppError, AppResult};
use crate::models::{Client, ClientFilter};
use crate::ui::messages::{detail, success, warning};
use crate::utils::table::Table;

fn print_client(client: &Client) {
    detail("id", client.id);
    detail("name", &client.name);
    detail("description", client.description.as_deref().unwrap_or(""));
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("client {id}"))
}

pub fn handle(action: &ClientAction, cfg: &Config) -> AppResult<()> {
    let mut db = open_db(cfg)?;
    let service = ClientService::new();

    match action {
        ClientAction::Add { name, description } => {
            let mut client = Client::new(name.as_str());
            client.description = description.clone();
            db.with_transaction(|tx| service.save(tx, &mut client))?;
            success(format!("Client #{} added.", client.id));
        }

        ClientAction::Update {
            id,
            name,
            description,
        } => {
            let client = db.with_transaction(|tx| {
                let mut client = service.get_by_id(tx, *id)?.ok_or_else(|| not_found(*id))?;
                if let Some(name) = name {
                    client.name = name.clone();
                }
                if let Some(description) = description {
                    client.description = Some(description.clone());
                }
                service.save(tx, &mut client)?;
                Ok(client)
            })?;
            success(format!("Client #{} updated.", client.id));
        }

        ClientAction::Get { id } => {
            let client = db
                .with_transaction(|tx| service.get_by_id(tx, *id))?
                .ok_or_else(|| not_found(*id))?;
            print_client(&client);
        }

        ClientAction::List {
            name,
            description,
            page,
        } => {
            let filter = ClientFilter {
                id: None,
                name: name.clone(),
                description: description.clone(),
            };
            let page = page_from(page, cfg);
            let result = db.with_transaction(|tx| service.get_all(tx, &filter, &page))?;

            if result.is_empty() {
                warning("No clients found.");
                return Ok(());
            }

            let mut table = Table::new(["id", "name", "description"]);
            for c in &result.items {
                table.add_row(vec![
                    c.id.to_string(),
                    c.name.clone(),
                    c.description.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
            print_page_footer(&result, "client");
        }

        ClientAction::Delete { id } => {
            db.with_transaction(|tx| service.delete(tx, *id))?;
            success(format!("Client #{id} deleted."));
        }
    }

    Ok(())
}
