use super::page::{Page, PageResult};
use super::query::{ConditionBuilder, Conditional, NamedParams, ToConditional};
use super::repository::{CrudRepository, ListQuery, expect_deleted, expect_updated};
use super::tx::Tx;
use crate::errors::AppResult;
use crate::models::{Project, ProjectFilter};
use rusqlite::Row;

const SELECT: &str = "SELECT id, name, client_id, description
  FROM project";

const COUNT: &str = "SELECT COUNT(*) AS total_count
  FROM project";

impl ToConditional for ProjectFilter {
    fn to_conditional(&self) -> Conditional {
        ConditionBuilder::new()
            .equal("id", "id", self.id)
            .contains("name", "name", self.name.as_deref())
            .equal("client_id", "clientId", self.client_id)
            .contains("description", "description", self.description.as_deref())
            .build()
    }
}

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        client_id: row.get("client_id")?,
        description: row.get("description")?,
    })
}

fn project_params(item: &Project) -> NamedParams {
    let mut params = NamedParams::new();
    params.insert("name", item.name.clone());
    params.insert("clientId", item.client_id);
    params.insert("description", item.description.clone());
    params
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectRepository;

impl CrudRepository for ProjectRepository {
    type Item = Project;
    type Filter = ProjectFilter;

    fn save(&self, tx: &Tx<'_>, item: &mut Project) -> AppResult<()> {
        let mut params = project_params(item);

        if item.id == 0 {
            let result = tx.execute(
                "INSERT INTO project (name, client_id, description)
                 VALUES (:name, :clientId, :description)",
                &params,
            )?;
            item.id = result.last_insert_id;
            return Ok(());
        }

        params.insert("id", item.id);
        let result = tx.execute(
            "UPDATE project
                SET name        = :name,
                    client_id   = :clientId,
                    description = :description
              WHERE id = :id",
            &params,
        )?;
        expect_updated(result)
    }

    fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Project>> {
        if id == 0 {
            return Ok(None);
        }
        let mut params = NamedParams::new();
        params.insert("id", id);
        tx.select_one(&format!("{SELECT}\n WHERE id = :id"), &params, map_project)
    }

    fn get_all(
        &self,
        tx: &Tx<'_>,
        page: &Page,
        filter: &ProjectFilter,
    ) -> AppResult<PageResult<Project>> {
        let query = ListQuery {
            select: SELECT,
            count: COUNT,
            order_by: "ORDER BY id".to_string(),
        };
        query.fetch(tx, page, &filter.to_conditional(), map_project)
    }

    fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        let mut params = NamedParams::new();
        params.insert("id", id);
        let result = tx.execute("DELETE FROM project WHERE id = :id", &params)?;
        expect_deleted(result)
    }
}
