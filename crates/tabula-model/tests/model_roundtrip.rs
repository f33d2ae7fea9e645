//! Integration tests driving a [`Model`] against a recording fake executor.

use std::fmt;
use std::sync::{Arc, Mutex};

use tabula_core::schema::{integer, text, Table, TableOptions};
use tabula_core::{Clauses, Value};
use tabula_model::{CreateStrategy, Executor, Model, ModelError, PreparedStatement};

/// One observed executor interaction.
#[derive(Debug, Clone, PartialEq)]
enum Op {
    Exec(String),
    Run { sql: String, bindings: Vec<Value> },
    First { sql: String, bindings: Vec<Value> },
    All { sql: String, bindings: Vec<Value> },
    Batch(Vec<(String, Vec<Value>)>),
}

#[derive(Debug)]
struct FakeError;

impl fmt::Display for FakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fake executor failure")
    }
}

impl std::error::Error for FakeError {}

#[derive(Default)]
struct FakeExecutor {
    ops: Arc<Mutex<Vec<Op>>>,
}

struct FakeStatement {
    sql: String,
    bindings: Vec<Value>,
    ops: Arc<Mutex<Vec<Op>>>,
}

impl PreparedStatement for FakeStatement {
    type Row = Vec<(String, Value)>;
    type Error = FakeError;

    fn bind(mut self, values: Vec<Value>) -> Self {
        self.bindings = values;
        self
    }

    async fn run(self) -> Result<(), FakeError> {
        self.ops.lock().unwrap().push(Op::Run {
            sql: self.sql,
            bindings: self.bindings,
        });
        Ok(())
    }

    async fn first(self) -> Result<Option<Self::Row>, FakeError> {
        self.ops.lock().unwrap().push(Op::First {
            sql: self.sql,
            bindings: self.bindings,
        });
        Ok(None)
    }

    async fn all(self) -> Result<Vec<Self::Row>, FakeError> {
        self.ops.lock().unwrap().push(Op::All {
            sql: self.sql,
            bindings: self.bindings,
        });
        Ok(Vec::new())
    }
}

impl Executor for FakeExecutor {
    type Statement = FakeStatement;
    type Error = FakeError;

    fn prepare(&self, sql: &str) -> FakeStatement {
        FakeStatement {
            sql: String::from(sql),
            bindings: Vec::new(),
            ops: self.ops.clone(),
        }
    }

    async fn exec(&self, sql: &str) -> Result<(), FakeError> {
        self.ops.lock().unwrap().push(Op::Exec(String::from(sql)));
        Ok(())
    }

    async fn batch(&self, statements: Vec<FakeStatement>) -> Result<(), FakeError> {
        let entries = statements
            .into_iter()
            .map(|s| (s.sql, s.bindings))
            .collect();
        self.ops.lock().unwrap().push(Op::Batch(entries));
        Ok(())
    }

    async fn dump(&self) -> Result<Vec<u8>, FakeError> {
        Ok(Vec::new())
    }
}

fn users_model() -> (Model<FakeExecutor>, Arc<Mutex<Vec<Op>>>) {
    let table = Table::validate(
        TableOptions::new("users"),
        vec![
            integer("id").primary_key().auto_increment(),
            text("name").not_null(),
        ],
    )
    .unwrap();
    let executor = FakeExecutor::default();
    let ops = executor.ops.clone();
    (Model::new(table, executor), ops)
}

#[tokio::test]
async fn test_create_table() {
    let (model, ops) = users_model();
    model.create_table(CreateStrategy::Create).await.unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Exec(String::from(
            "CREATE TABLE `users` (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)"
        ))]
    );
}

#[tokio::test]
async fn test_create_table_force_prefixes_drop() {
    let (model, ops) = users_model();
    model.create_table(CreateStrategy::Force).await.unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Exec(String::from(
            "DROP TABLE IF EXISTS `users`; \
             CREATE TABLE `users` (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)"
        ))]
    );
}

#[tokio::test]
async fn test_create_table_alter_fails_loudly() {
    let (model, ops) = users_model();
    let err = model.create_table(CreateStrategy::Alter).await.unwrap_err();

    assert!(matches!(err, ModelError::NotImplemented(_)));
    assert!(ops.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_drop_table() {
    let (model, ops) = users_model();
    model.drop_table().await.unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Exec(String::from("DROP TABLE `users`"))]
    );
}

#[tokio::test]
async fn test_select_bindings_arrive_untouched() {
    let (model, ops) = users_model();
    let rows = model
        .all(&Clauses::new().where_eq("name", "alice").limit(5))
        .await
        .unwrap();

    assert!(rows.is_empty());
    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::All {
            sql: String::from("SELECT * FROM `users` WHERE name = ? LIMIT 5"),
            bindings: vec![Value::Text(String::from("alice"))],
        }]
    );
}

#[tokio::test]
async fn test_first_returns_executor_row() {
    let (model, ops) = users_model();
    let row = model.first(&Clauses::new().where_eq("id", 1)).await.unwrap();

    assert!(row.is_none());
    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::First {
            sql: String::from("SELECT * FROM `users` WHERE id = ?"),
            bindings: vec![Value::Int(1)],
        }]
    );
}

#[tokio::test]
async fn test_insert_one() {
    let (model, ops) = users_model();
    model
        .insert_one(&Clauses::new().data("name", "alice"))
        .await
        .unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Run {
            sql: String::from("INSERT INTO `users` (name) VALUES (?)"),
            bindings: vec![Value::Text(String::from("alice"))],
        }]
    );
}

#[tokio::test]
async fn test_insert_all_batches_one_statement_per_row() {
    let (model, ops) = users_model();
    model
        .insert_all(&[
            Clauses::new().data("name", "alice"),
            Clauses::new().data("name", "bob"),
        ])
        .await
        .unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Batch(vec![
            (
                String::from("INSERT INTO `users` (name) VALUES (?)"),
                vec![Value::Text(String::from("alice"))],
            ),
            (
                String::from("INSERT INTO `users` (name) VALUES (?)"),
                vec![Value::Text(String::from("bob"))],
            ),
        ])]
    );
}

#[tokio::test]
async fn test_update_and_delete() {
    let (model, ops) = users_model();
    model
        .update(&Clauses::new().data("name", "carol").where_eq("id", 2))
        .await
        .unwrap();
    model.delete(&Clauses::new().where_eq("id", 2)).await.unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![
            Op::Run {
                sql: String::from("UPDATE `users` SET name = ? WHERE id = ?"),
                bindings: vec![Value::Text(String::from("carol")), Value::Int(2)],
            },
            Op::Run {
                sql: String::from("DELETE FROM `users` WHERE id = ?"),
                bindings: vec![Value::Int(2)],
            },
        ]
    );
}

#[tokio::test]
async fn test_upsert_defaults_conflict_target_to_primary_keys() {
    let (model, ops) = users_model();
    model
        .upsert(
            &Clauses::new()
                .data("id", 1)
                .data("name", "alice")
                .on_conflict_update("name", "alice")
                .where_eq("id", 1),
        )
        .await
        .unwrap();

    assert_eq!(
        *ops.lock().unwrap(),
        vec![Op::Run {
            sql: String::from(
                "INSERT INTO `users` (id, name) VALUES (?, ?) \
                 ON CONFLICT (id) DO UPDATE SET name = ? WHERE id = ?"
            ),
            bindings: vec![
                Value::Int(1),
                Value::Text(String::from("alice")),
                Value::Text(String::from("alice")),
                Value::Int(1),
            ],
        }]
    );
}

#[tokio::test]
async fn test_core_errors_surface_before_the_executor_is_touched() {
    let (model, ops) = users_model();
    let err = model.insert_one(&Clauses::new()).await.unwrap_err();

    assert!(matches!(err, ModelError::Core(_)));
    assert!(ops.lock().unwrap().is_empty());
}
