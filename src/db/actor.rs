use crate::db::models::{DbStudent, InsertOutcome, StudentFields};
use crate::db::schema::Backend;
use crate::db::traits::StudentStore;
use crate::error::StoreError;
use async_trait::async_trait;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// List every student row.
    ListStudents(RpcReplyPort<Result<Vec<DbStudent>, StoreError>>),

    /// Look up a student by exact email.
    FindByEmail(String, RpcReplyPort<Result<Option<DbStudent>, StoreError>>),

    /// Insert a student and return the generated id.
    Insert(StudentFields, RpcReplyPort<Result<InsertOutcome, StoreError>>),

    /// Overwrite name/email of a student by id; replies with rows affected.
    Update(i64, StudentFields, RpcReplyPort<Result<u64, StoreError>>),

    /// Delete a student by id; replies with rows affected.
    Delete(i64, RpcReplyPort<Result<u64, StoreError>>),
}

/// Cloneable handle to the actor owning the store connection.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    /// Stop the actor; its connection is closed in `post_stop`.
    pub fn stop(&self) {
        self.actor.stop(None);
    }
}

#[async_trait]
impl StudentStore for DbActorHandle {
    async fn list_students(&self) -> Result<Vec<DbStudent>, StoreError> {
        ractor::call!(self.actor, DbActorMessage::ListStudents).map_err(|e| {
            StoreError::RactorError(format!("DbActor ListStudents RPC failed: {e}"))
        })?
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<DbStudent>, StoreError> {
        ractor::call!(self.actor, DbActorMessage::FindByEmail, email.to_string()).map_err(|e| {
            StoreError::RactorError(format!("DbActor FindByEmail RPC failed: {e}"))
        })?
    }

    async fn insert_student(&self, fields: StudentFields) -> Result<InsertOutcome, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Insert, fields)
            .map_err(|e| StoreError::RactorError(format!("DbActor Insert RPC failed: {e}")))?
    }

    async fn update_student(&self, id: i64, fields: StudentFields) -> Result<u64, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Update, id, fields)
            .map_err(|e| StoreError::RactorError(format!("DbActor Update RPC failed: {e}")))?
    }

    async fn delete_student(&self, id: i64) -> Result<u64, StoreError> {
        ractor::call!(self.actor, DbActorMessage::Delete, id)
            .map_err(|e| StoreError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }
}

/// Startup arguments for [`DbActor`].
#[derive(Debug, Clone)]
pub struct DbActorArgs {
    pub database_url: String,
    pub bootstrap_schema: bool,
}

struct DbActorState {
    pool: AnyPool,
    backend: Backend,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = DbActorArgs;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        sqlx::any::install_default_drivers();

        // One connection for the whole process, kept open for its lifetime.
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect(args.database_url.as_str())
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        let backend = Backend::from_url(&args.database_url);
        if args.bootstrap_schema {
            sqlx::query(backend.init_sql())
                .execute(&pool)
                .await
                .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;
        }

        info!("DbActor initialized");
        Ok(DbActorState { pool, backend })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool.close().await;
        info!("DbActor stopped, connection closed");
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListStudents(reply) => {
                let res = list_students(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::FindByEmail(email, reply) => {
                let res = find_by_email(&state.pool, &email).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Insert(fields, reply) => {
                let res = insert_student(&state.pool, state.backend, fields).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Update(id, fields, reply) => {
                let res = update_student(&state.pool, id, fields).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(id, reply) => {
                let res = delete_student(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

async fn list_students(pool: &AnyPool) -> Result<Vec<DbStudent>, StoreError> {
    let rows = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT ID, Name, Email
        FROM student
        ORDER BY ID
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

async fn find_by_email(pool: &AnyPool, email: &str) -> Result<Option<DbStudent>, StoreError> {
    let row = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT ID, Name, Email
        FROM student
        WHERE Email = ?
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

async fn insert_student(
    pool: &AnyPool,
    backend: Backend,
    fields: StudentFields,
) -> Result<InsertOutcome, StoreError> {
    // The generated id is only visible on the connection that ran the insert.
    let mut conn = pool.acquire().await?;

    let result = sqlx::query("INSERT INTO student (Name, Email) VALUES (?, ?)")
        .bind(fields.name)
        .bind(fields.email)
        .execute(&mut *conn)
        .await?;

    let insert_id: i64 = sqlx::query_scalar(backend.last_insert_id_sql())
        .fetch_one(&mut *conn)
        .await?;

    let outcome = InsertOutcome {
        insert_id,
        affected_rows: result.rows_affected(),
    };
    debug!(insert_id, "student row inserted");
    Ok(outcome)
}

async fn update_student(pool: &AnyPool, id: i64, fields: StudentFields) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE student SET Name = ?, Email = ? WHERE ID = ?")
        .bind(fields.name)
        .bind(fields.email)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

async fn delete_student(pool: &AnyPool, id: i64) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM student WHERE ID = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Spawn the database actor and return a cloneable handle.
///
/// Fails if the store cannot be reached or the schema bootstrap is rejected.
pub async fn spawn(args: DbActorArgs) -> Result<DbActorHandle, StoreError> {
    let (actor, _jh) = Actor::spawn(None, DbActor, args)
        .await
        .map_err(|e| StoreError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}
