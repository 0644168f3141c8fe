//! SQL statements for the Postgres backend.

/// Schema bootstrap, run once at startup.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS resources (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT,
    created TIMESTAMPTZ NOT NULL,
    modified TIMESTAMPTZ NOT NULL
);
";

pub const SELECT_ALL_RESOURCES: &str = "
SELECT id, title, content, created, modified
FROM resources
ORDER BY created, id
";

pub const SELECT_RESOURCES_PAGE: &str = "
SELECT id, title, content, created, modified
FROM resources
ORDER BY created, id
LIMIT $1 OFFSET $2
";

pub const SELECT_RESOURCE_BY_ID: &str = "
SELECT id, title, content, created, modified
FROM resources
WHERE id = $1
";

pub const INSERT_RESOURCE: &str = "
INSERT INTO resources (id, title, content, created, modified)
VALUES ($1, $2, $3, $4, $5)
";

/// Partial update: NULL bind parameters leave the column untouched.
pub const UPDATE_RESOURCE: &str = "
UPDATE resources
SET title = COALESCE($2, title),
    content = COALESCE($3, content),
    modified = $4
WHERE id = $1
RETURNING id, title, content, created, modified
";

pub const DELETE_RESOURCE: &str = "
DELETE FROM resources
WHERE id = $1
";

pub const PING: &str = "SELECT 1";
