mod command;
mod query;

pub use self::command::{CategoryCommandServiceTrait, DynCategoryCommandService};
pub use self::query::{CategoryQueryServiceTrait, DynCategoryQueryService};
