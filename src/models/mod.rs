pub mod category;
pub mod task;
pub mod task_category;
pub mod user;
pub mod user_type;

pub use category::{Category, CategoryInput, CategoryUpdate};
pub use task::{Task, TaskInput, TaskUpdate, TaskWithUser};
pub use task_category::{
    TaskCategory, TaskCategoryDetail, TaskCategoryInput, TaskCategoryUpdate,
};
pub use user::{User, UserInput, UserUpdate};
pub use user_type::{UserType, ADMIN_USER_TYPE_ID, DEFAULT_USER_TYPE_ID};
