//! Todo エンティティと値オブジェクト
//!
//! ID の採番と永続化はストア側の責務です。本モジュールは
//! タイトルの検証とエンティティの形のみを扱います。

use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// タイトルの最大文字数
pub const TITLE_MAX_CHARS: usize = 200;

/// ストアが採番する整数 ID（1 始まり、再利用しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// 次の ID。u64 を使い切ったら `None`。
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTodoId(s.to_string()))
    }
}

/// 検証済みのタイトル
///
/// `Title` を保持していれば、空でなく 200 文字以内であることが保証されます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// 入力文字列を検証してタイトルを生成します。
    /// 空文字・空白のみ・200 文字超過は `DomainError` になります。
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }

        let actual = raw.chars().count();
        if actual > TITLE_MAX_CHARS {
            return Err(DomainError::TitleTooLong {
                max: TITLE_MAX_CHARS,
                actual,
            });
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// 新規作成時の状態（completed=false）で組み立てます。
    pub fn new(id: TodoId, title: Title, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into_inner(),
            completed: false,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_title() {
        assert_eq!(Title::parse("").unwrap_err(), DomainError::EmptyTitle);
    }

    #[test]
    fn parse_rejects_whitespace_only_title() {
        assert_eq!(Title::parse("  \t\n").unwrap_err(), DomainError::EmptyTitle);
    }

    #[test]
    fn parse_accepts_exactly_200_chars() {
        let title = Title::parse("a".repeat(200)).unwrap();
        assert_eq!(title.as_str().len(), 200);
    }

    #[test]
    fn parse_rejects_201_chars() {
        let err = Title::parse("a".repeat(201)).unwrap_err();
        assert_eq!(
            err,
            DomainError::TitleTooLong {
                max: 200,
                actual: 201
            }
        );
    }

    #[test]
    fn parse_counts_characters_not_bytes() {
        // 200 文字だが UTF-8 では 600 バイト
        let title = "あ".repeat(200);
        assert!(Title::parse(title.clone()).is_ok());
        assert!(Title::parse(format!("{title}あ")).is_err());
    }

    #[test]
    fn parse_keeps_title_as_submitted() {
        let title = Title::parse(" Buy milk ").unwrap();
        assert_eq!(title.as_str(), " Buy milk ");
    }

    #[test]
    fn todo_id_parses_from_path_segment() {
        assert_eq!("42".parse::<TodoId>().unwrap(), TodoId::new(42));
        assert_eq!(
            "abc".parse::<TodoId>().unwrap_err(),
            DomainError::InvalidTodoId("abc".to_string())
        );
        assert!("-1".parse::<TodoId>().is_err());
    }

    #[test]
    fn next_id_stops_at_u64_max() {
        assert_eq!(TodoId::new(1).next(), Some(TodoId::new(2)));
        assert_eq!(TodoId::new(u64::MAX).next(), None);
    }

    #[test]
    fn new_todo_starts_incomplete() {
        let now = Utc::now();
        let todo = Todo::new(TodoId::new(1), Title::parse("Task").unwrap(), now);
        assert_eq!(todo.id, TodoId::new(1));
        assert_eq!(todo.title, "Task");
        assert!(!todo.completed);
        assert_eq!(todo.created_at, now);
    }

    #[test]
    fn todo_serializes_with_camel_case_fields() {
        let created_at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let todo = Todo::new(TodoId::new(7), Title::parse("Task").unwrap(), created_at);

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Task");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-01-02T03:04:05Z");
    }

    // プロパティベーステスト: 1..=200 文字の非空白タイトルは常に受理される
    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn valid_titles_are_accepted(title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,199}") {
                let parsed = Title::parse(title.clone()).unwrap();
                prop_assert_eq!(parsed.as_str(), title.as_str());
            }

            #[test]
            fn oversized_titles_are_rejected(len in 201usize..400) {
                let is_too_long = matches!(
                    Title::parse("x".repeat(len)),
                    Err(DomainError::TitleTooLong { .. })
                );
                prop_assert!(is_too_long);
            }
        }
    }
}
