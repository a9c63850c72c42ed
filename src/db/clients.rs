use super::page::{Page, PageResult};
use super::query::{ConditionBuilder, Conditional, NamedParams, ToConditional};
use super::repository::{CrudRepository, ListQuery, expect_deleted, expect_updated};
use super::tx::Tx;
use crate::errors::AppResult;
use crate::models::{Client, ClientFilter};
use rusqlite::Row;

const SELECT: &str = "SELECT id, name, description
  FROM client";

const COUNT: &str = "SELECT COUNT(*) AS total_count
  FROM client";

impl ToConditional for ClientFilter {
    fn to_conditional(&self) -> Conditional {
        ConditionBuilder::new()
            .equal("id", "id", self.id)
            .contains("name", "name", self.name.as_deref())
            .contains("description", "description", self.description.as_deref())
            .build()
    }
}

fn map_client(row: &Row) -> rusqlite::Result<Client> {
    Ok(Client {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

fn client_params(item: &Client) -> NamedParams {
    let mut params = NamedParams::new();
    params.insert("name", item.name.clone());
    params.insert("description", item.description.clone());
    params
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRepository;

impl CrudRepository for ClientRepository {
    type Item = Client;
    type Filter = ClientFilter;

    fn save(&self, tx: &Tx<'_>, item: &mut Client) -> AppResult<()> {
        let mut params = client_params(item);

        if item.id == 0 {
            let result = tx.execute(
                "INSERT INTO client (name, description)
                 VALUES (:name, :description)",
                &params,
            )?;
            item.id = result.last_insert_id;
            return Ok(());
        }

        params.insert("id", item.id);
        let result = tx.execute(
            "UPDATE client
                SET name        = :name,
                    description = :description
              WHERE id = :id",
            &params,
        )?;
        expect_updated(result)
    }

    fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Client>> {
        if id == 0 {
            return Ok(None);
        }
        let mut params = NamedParams::new();
        params.insert("id", id);
        tx.select_one(&format!("{SELECT}\n WHERE id = :id"), &params, map_client)
    }

    fn get_all(
        &self,
        tx: &Tx<'_>,
        page: &Page,
        filter: &ClientFilter,
    ) -> AppResult<PageResult<Client>> {
        let query = ListQuery {
            select: SELECT,
            count: COUNT,
            order_by: "ORDER BY id".to_string(),
        };
        query.fetch(tx, page, &filter.to_conditional(), map_client)
    }

    fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        let mut params = NamedParams::new();
        params.insert("id", id);
        let result = tx.execute("DELETE FROM client WHERE id = :id", &params)?;
        expect_deleted(result)
    }
}
