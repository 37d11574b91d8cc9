use crate::clock::{Clock, SystemClock};
use domain::{Title, Todo, TodoId};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// ストア層のエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo store lock poisoned")]
    LockPoisoned,

    #[error("todo id space exhausted")]
    IdSpaceExhausted,
}

/// Todo ストアの抽象
///
/// ハンドラはこの trait 経由でのみストアに触れます。
pub trait TodoRepository: Send + Sync {
    /// 次の ID を採番し、completed=false・作成日時=現在時刻で保存します。
    fn insert(&self, title: Title) -> Result<Todo, StoreError>;
    /// 該当 ID があれば削除し、削除したかどうかを返します。
    fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
    fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;
    /// 作成日時の降順（同時刻は ID の降順）で全件を返します。
    fn list_all(&self) -> Result<Vec<Todo>, StoreError>;
    fn count(&self) -> Result<usize, StoreError>;
}

#[derive(Debug)]
struct TodoTable {
    todos: Vec<Todo>,
    next_id: TodoId,
}

impl Default for TodoTable {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            next_id: TodoId::new(1),
        }
    }
}

/// プロセス内メモリ上のストア
///
/// ID カウンタとレコード群を 1 つの Mutex で保護します。
pub struct InMemoryTodoRepository {
    table: Mutex<TodoTable>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(TodoTable::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, TodoTable>, StoreError> {
        self.table.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl TodoRepository for InMemoryTodoRepository {
    fn insert(&self, title: Title) -> Result<Todo, StoreError> {
        let mut table = self.lock()?;
        let id = table.next_id;
        table.next_id = id.next().ok_or(StoreError::IdSpaceExhausted)?;

        let todo = Todo::new(id, title, self.clock.now());
        table.todos.push(todo.clone());
        tracing::debug!(todo_id = %id, "todo inserted");
        Ok(todo)
    }

    fn delete(&self, id: TodoId) -> Result<bool, StoreError> {
        let mut table = self.lock()?;
        let before = table.todos.len();
        table.todos.retain(|todo| todo.id != id);
        let removed = table.todos.len() != before;
        if removed {
            tracing::debug!(todo_id = %id, "todo deleted");
        }
        Ok(removed)
    }

    fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let table = self.lock()?;
        Ok(table.todos.iter().find(|todo| todo.id == id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let mut todos = self.lock()?.todos.clone();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(todos)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.todos.len())
    }
}
