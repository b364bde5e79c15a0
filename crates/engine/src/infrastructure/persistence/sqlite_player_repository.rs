//! SQLite-backed player storage.
//!
//! Filters are translated predicate by predicate into a parameterized
//! `WHERE` clause; the same clause feeds both the page query and the count.

use async_trait::async_trait;
use chrono::DateTime;
use roster_domain::{
    value_objects::{MAX_NAME_LENGTH, MAX_TITLE_LENGTH},
    BoolField, EnumValue, NumericField, PageRequest, Player, PlayerFilter, PlayerId, PlayerOrder,
    PlayerPredicate, Profession, Race, TextField,
};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::infrastructure::ports::{PlayerRepo, RepoError};

const SELECT_PLAYERS: &str = "SELECT id, name, title, race, profession, experience, level, \
     until_next_level, birthday, banned FROM players";

/// SQLite implementation of player storage.
pub struct SqlitePlayerRepo {
    pool: SqlitePool,
}

impl SqlitePlayerRepo {
    /// Open (creating if needed) the database at `db_path` and ensure the
    /// `players` table exists.
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL CHECK (length(name) <= {name_max}),
                title TEXT NOT NULL CHECK (length(title) <= {title_max}),
                race TEXT NOT NULL,
                profession TEXT NOT NULL,
                experience INTEGER NOT NULL,
                level INTEGER NOT NULL,
                until_next_level INTEGER NOT NULL,
                birthday INTEGER NOT NULL,
                banned INTEGER NOT NULL
            )
            "#,
            name_max = MAX_NAME_LENGTH,
            title_max = MAX_TITLE_LENGTH,
        ))
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_players_table", e))?;

        tracing::debug!(db_path = %db_path, "SQLite player store ready");
        Ok(Self { pool })
    }

    async fn insert(&self, player: &Player) -> Result<Player, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO players (name, title, race, profession, experience, level,
                                 until_next_level, birthday, banned)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .bind(player.birthday.timestamp_millis())
        .bind(player.banned)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("insert_player", e))?;

        let id = PlayerId::new(result.last_insert_rowid())
            .map_err(|e| RepoError::database("insert_player", e))?;
        Ok(player.clone().with_id(id))
    }

    /// Overwrite an existing row. A row deleted in the meantime stays deleted.
    async fn replace(&self, id: PlayerId, player: &Player) -> Result<Player, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE players SET
                name = ?,
                title = ?,
                race = ?,
                profession = ?,
                experience = ?,
                level = ?,
                until_next_level = ?,
                birthday = ?,
                banned = ?
            WHERE id = ?
            "#,
        )
        .bind(&player.name)
        .bind(&player.title)
        .bind(player.race.as_str())
        .bind(player.profession.as_str())
        .bind(player.experience)
        .bind(player.level)
        .bind(player.until_next_level)
        .bind(player.birthday.timestamp_millis())
        .bind(player.banned)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("update_player", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Player", id));
        }
        Ok(player.clone())
    }
}

#[async_trait]
impl PlayerRepo for SqlitePlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_PLAYERS} WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_player", e))?;

        row.map(|r| player_from_row(&r)).transpose()
    }

    async fn exists(&self, id: PlayerId) -> Result<bool, RepoError> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM players WHERE id = ?)")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("player_exists", e))?;
        Ok(found != 0)
    }

    async fn save(&self, player: &Player) -> Result<Player, RepoError> {
        match player.id {
            Some(id) => self.replace(id, player).await,
            None => self.insert(player).await,
        }
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_player", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Player", id));
        }
        Ok(())
    }

    async fn find_page(
        &self,
        filter: &PlayerFilter,
        page: &PageRequest,
    ) -> Result<Vec<Player>, RepoError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PLAYERS);
        push_filter(&mut builder, filter);

        // Offsets past i64::MAX are still past the end of the table.
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        builder
            .push(" ORDER BY ")
            .push(order_column(page.order()))
            .push(" ASC, id ASC LIMIT ")
            .push_bind(i64::from(page.size()))
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_players", e))?;

        rows.iter().map(player_from_row).collect()
    }

    async fn count_matching(&self, filter: &PlayerFilter) -> Result<u64, RepoError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM players");
        push_filter(&mut builder, filter);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_players", e))?;
        Ok(count.max(0) as u64)
    }
}

/// Append ` WHERE ...` for every predicate in `filter`.
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, filter: &PlayerFilter) {
    for (i, predicate) in filter.predicates().iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        push_predicate(builder, predicate);
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: &PlayerPredicate) {
    match predicate {
        // instr() is case-sensitive, unlike LIKE
        PlayerPredicate::SubstringMatch { field, needle } => {
            builder
                .push("instr(")
                .push(text_column(*field))
                .push(", ")
                .push_bind(needle.clone())
                .push(") > 0");
        }
        PlayerPredicate::EnumEquals(EnumValue::Race(race)) => {
            builder.push("race = ").push_bind(race.as_str());
        }
        PlayerPredicate::EnumEquals(EnumValue::Profession(profession)) => {
            builder.push("profession = ").push_bind(profession.as_str());
        }
        PlayerPredicate::NumericRange { field, min, max } => {
            push_range(builder, numeric_column(*field), *min, *max);
        }
        PlayerPredicate::DateRange { after, before } => {
            push_range(builder, "birthday", *after, *before);
        }
        PlayerPredicate::BoolEquals { field, value } => {
            builder
                .push(bool_column(*field))
                .push(" = ")
                .push_bind(*value);
        }
    }
}

fn push_range(
    builder: &mut QueryBuilder<'_, Sqlite>,
    column: &'static str,
    min: Option<i64>,
    max: Option<i64>,
) {
    match (min, max) {
        (Some(min), Some(max)) => {
            builder
                .push(column)
                .push(" BETWEEN ")
                .push_bind(min)
                .push(" AND ")
                .push_bind(max);
        }
        (Some(min), None) => {
            builder.push(column).push(" >= ").push_bind(min);
        }
        (None, Some(max)) => {
            builder.push(column).push(" <= ").push_bind(max);
        }
        (None, None) => {
            builder.push("1 = 1");
        }
    }
}

fn text_column(field: TextField) -> &'static str {
    match field {
        TextField::Name => "name",
        TextField::Title => "title",
    }
}

fn numeric_column(field: NumericField) -> &'static str {
    match field {
        NumericField::Experience => "experience",
        NumericField::Level => "level",
    }
}

fn bool_column(field: BoolField) -> &'static str {
    match field {
        BoolField::Banned => "banned",
    }
}

fn order_column(order: PlayerOrder) -> &'static str {
    // Column names match the sortable field names one to one.
    order.field_name()
}

fn player_from_row(row: &SqliteRow) -> Result<Player, RepoError> {
    let get_err = |e: sqlx::Error| RepoError::serialization(e);

    let id: i64 = row.try_get("id").map_err(get_err)?;
    let race: String = row.try_get("race").map_err(get_err)?;
    let profession: String = row.try_get("profession").map_err(get_err)?;
    let birthday: i64 = row.try_get("birthday").map_err(get_err)?;

    Ok(Player {
        id: Some(PlayerId::new(id).map_err(RepoError::serialization)?),
        name: row.try_get("name").map_err(get_err)?,
        title: row.try_get("title").map_err(get_err)?,
        race: race.parse::<Race>().map_err(RepoError::serialization)?,
        profession: profession
            .parse::<Profession>()
            .map_err(RepoError::serialization)?,
        experience: row.try_get("experience").map_err(get_err)?,
        level: row.try_get("level").map_err(get_err)?,
        until_next_level: row.try_get("until_next_level").map_err(get_err)?,
        birthday: DateTime::from_timestamp_millis(birthday).ok_or_else(|| {
            RepoError::serialization(format!("birthday out of range: {}", birthday))
        })?,
        banned: row.try_get("banned").map_err(get_err)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, race: Race, experience: i32, banned: bool) -> Player {
        Player::new(
            name,
            "Of the Grey Havens",
            race,
            Profession::Sorcerer,
            experience,
            DateTime::from_timestamp_millis(1_000_000_000_000 + i64::from(experience)).unwrap(),
            banned,
        )
    }

    async fn open_repo(dir: &tempfile::TempDir) -> SqlitePlayerRepo {
        let db_path = dir.path().join("players.db");
        SqlitePlayerRepo::new(&db_path.to_string_lossy())
            .await
            .expect("open sqlite store")
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let saved = repo
            .save(&player("Elrond", Race::Elf, 5_000, true))
            .await
            .expect("save");
        let id = saved.id.expect("assigned id");

        let loaded = repo.get(id).await.expect("get").expect("row");
        assert_eq!(loaded, saved);
        assert_eq!(loaded.level, 9);
        assert!(repo.exists(id).await.expect("exists"));
    }

    #[tokio::test]
    async fn players_persist_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let id = {
            let repo = open_repo(&dir).await;
            repo.save(&player("Cirdan", Race::Elf, 0, false))
                .await
                .expect("save")
                .id
                .expect("id")
        };

        let repo = open_repo(&dir).await;
        assert!(repo.get(id).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn update_replaces_existing_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let mut saved = repo
            .save(&player("Boromir", Race::Human, 100, false))
            .await
            .expect("save");
        saved.banned = true;
        repo.save(&saved).await.expect("update");

        assert_eq!(repo.count_matching(&PlayerFilter::new()).await.expect("count"), 1);
        let loaded = repo.get(saved.id.expect("id")).await.expect("get").expect("row");
        assert!(loaded.banned);
    }

    #[tokio::test]
    async fn update_of_deleted_row_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let saved = repo
            .save(&player("Saruman", Race::Human, 400, false))
            .await
            .expect("save");
        repo.delete(saved.id.expect("id")).await.expect("delete");

        let err = repo.save(&saved).await.expect_err("row is gone");
        assert!(err.is_not_found());
        assert_eq!(
            repo.count_matching(&PlayerFilter::new()).await.expect("count"),
            0
        );
    }

    #[tokio::test]
    async fn page_beyond_i64_offset_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        repo.save(&player("Radagast", Race::Human, 0, false))
            .await
            .expect("save");

        let page = PageRequest::new(u32::MAX, u32::MAX, PlayerOrder::Id).expect("page");
        let found = repo
            .find_page(&PlayerFilter::new(), &page)
            .await
            .expect("find");
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let err = repo
            .delete(PlayerId::new(77).expect("id"))
            .await
            .expect_err("missing row");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn substring_match_is_case_sensitive() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        repo.save(&player("Bard", Race::Human, 0, false)).await.expect("save");
        repo.save(&player("BARD", Race::Human, 1, false)).await.expect("save");

        let filter = PlayerFilter::new().with(PlayerPredicate::SubstringMatch {
            field: TextField::Name,
            needle: "ar".to_string(),
        });
        assert_eq!(repo.count_matching(&filter).await.expect("count"), 1);
    }

    #[tokio::test]
    async fn page_is_ordered_and_windowed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;
        for (i, name) in ["E", "D", "C", "B", "A"].iter().enumerate() {
            repo.save(&player(name, Race::Orc, i as i32 * 10, false))
                .await
                .expect("save");
        }

        let page = PageRequest::new(1, 2, PlayerOrder::Name).expect("page");
        let found = repo
            .find_page(&PlayerFilter::new(), &page)
            .await
            .expect("find");
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[tokio::test]
    async fn storage_rejects_oversized_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let mut too_long = player("ok", Race::Troll, 0, false);
        too_long.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(repo.save(&too_long).await.is_err());
    }
}
