use crate::db::clients::ClientRepository;
use crate::db::page::{Page, PageResult};
use crate::db::projects::ProjectRepository;
use crate::db::repository::CrudRepository;
use crate::db::tx::Tx;
use crate::errors::AppResult;
use crate::models::{Client, ClientFilter, Project, ProjectFilter};

pub const NEW_PROJECT_NAME: &str = "New Project";

/// Project CRUD, plus the lookup of a project's client.
pub struct ProjectService<R = ProjectRepository, C = ClientRepository> {
    repo: R,
    clients: C,
}

impl ProjectService<ProjectRepository, ClientRepository> {
    pub fn new() -> Self {
        Self {
            repo: ProjectRepository,
            clients: ClientRepository,
        }
    }
}

impl Default for ProjectService<ProjectRepository, ClientRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, C> ProjectService<R, C>
where
    R: CrudRepository<Item = Project, Filter = ProjectFilter>,
    C: CrudRepository<Item = Client, Filter = ClientFilter>,
{
    /// Unsaved project with the default name.
    pub fn new_template(&self) -> Project {
        Project::new(NEW_PROJECT_NAME)
    }

    /// A client id of 0 means "no client".
    pub fn save(&self, tx: &Tx<'_>, project: &mut Project) -> AppResult<()> {
        if project.client_id == Some(0) {
            project.client_id = None;
        }
        self.repo.save(tx, project)
    }

    pub fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Project>> {
        self.repo.get_by_id(tx, id)
    }

    pub fn get_all(
        &self,
        tx: &Tx<'_>,
        filter: &ProjectFilter,
        page: &Page,
    ) -> AppResult<PageResult<Project>> {
        self.repo.get_all(tx, page, filter)
    }

    pub fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        self.repo.delete(tx, id)
    }

    /// The client referenced by `project`, if it has one.
    pub fn client_of(&self, tx: &Tx<'_>, project: &Project) -> AppResult<Option<Client>> {
        match project.client_id {
            Some(id) => self.clients.get_by_id(tx, id),
            None => Ok(None),
        }
    }
}
