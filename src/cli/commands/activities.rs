use crate::errors::AppResult;
use crate::models::Activity;

/// Print every activity, or only `id` after checking it exists.
pub fn handle(id: Option<&str>) -> AppResult<()> {
    match id {
        Some(id) => println!("{}", Activity::parse(id)?),
        None => {
            for activity in Activity::all() {
                println!("{activity}");
            }
        }
    }
    Ok(())
}
