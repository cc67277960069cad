//! Todo Use Cases

pub mod create_todo;
pub mod delete_todo;
pub mod get_todo_by_id;
pub mod list_todos;
pub mod patch_todo;
pub mod replace_todo;

pub use create_todo::CreateTodoUseCase;
pub use delete_todo::DeleteTodoUseCase;
pub use get_todo_by_id::GetTodoByIdUseCase;
pub use list_todos::ListTodosUseCase;
pub use patch_todo::PatchTodoUseCase;
pub use replace_todo::ReplaceTodoUseCase;
