use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS chat (
        id           TEXT PRIMARY KEY NOT NULL,
        type         TEXT NOT NULL CHECK (type IN ('private', 'group', 'container')),
        usergroup_id INTEGER,
        container_id TEXT,
        created_at   INTEGER NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_chat_usergroup ON chat (usergroup_id)",
    r#"CREATE TABLE IF NOT EXISTS chat_participant (
        id        TEXT PRIMARY KEY NOT NULL,
        chat_id   TEXT NOT NULL REFERENCES chat (id) ON DELETE CASCADE,
        user_id   TEXT NOT NULL,
        role      TEXT NOT NULL,
        status    TEXT NOT NULL,
        joined_at INTEGER NOT NULL,
        UNIQUE (chat_id, user_id)
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_chat_participant_user ON chat_participant (user_id)",
    // No foreign key: messages outlive their chat.
    r#"CREATE TABLE IF NOT EXISTS message (
        id           TEXT PRIMARY KEY NOT NULL,
        chat_id      TEXT NOT NULL,
        sender_id    TEXT NOT NULL,
        content      TEXT NOT NULL,
        message_type TEXT NOT NULL,
        created_at   INTEGER NOT NULL,
        read_status  INTEGER NOT NULL DEFAULT 0
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_message_chat_created ON message (chat_id, created_at)",
];

/// Create the tables and indexes if they do not exist yet.
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!("Database schema applied ({} statements)", STATEMENTS.len());
    Ok(())
}
