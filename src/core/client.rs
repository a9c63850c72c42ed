use crate::db::clients::ClientRepository;
use crate::db::page::{Page, PageResult};
use crate::db::repository::CrudRepository;
use crate::db::tx::Tx;
use crate::errors::AppResult;
use crate::models::{Client, ClientFilter};

/// Client CRUD on top of a repository.
pub struct ClientService<R = ClientRepository> {
    repo: R,
}

impl ClientService<ClientRepository> {
    pub fn new() -> Self {
        Self {
            repo: ClientRepository,
        }
    }
}

impl Default for ClientService<ClientRepository> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ClientService<R>
where
    R: CrudRepository<Item = Client, Filter = ClientFilter>,
{
    pub fn save(&self, tx: &Tx<'_>, client: &mut Client) -> AppResult<()> {
        self.repo.save(tx, client)
    }

    pub fn get_by_id(&self, tx: &Tx<'_>, id: i64) -> AppResult<Option<Client>> {
        self.repo.get_by_id(tx, id)
    }

    pub fn get_all(
        &self,
        tx: &Tx<'_>,
        filter: &ClientFilter,
        page: &Page,
    ) -> AppResult<PageResult<Client>> {
        self.repo.get_all(tx, page, filter)
    }

    pub fn delete(&self, tx: &Tx<'_>, id: i64) -> AppResult<()> {
        self.repo.delete(tx, id)
    }
}
