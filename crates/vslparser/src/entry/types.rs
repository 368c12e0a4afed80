//! Основные типы записи.

use std::{fmt, str::FromStr};

use serde::Serialize;

use super::Fields;
use crate::error::ParseError;

/// Идентификатор транзакции (VXID).
///
/// Уникальность в пределах потока гарантирует `varnishlog`, а не парсер.
pub type Vxid = u64;

/// Тип транзакции, указанный в заголовке записи между `<<` и `>>`.
///
/// Сравнение при разборе регистрозависимое: `request` не является
/// [`EntryKind::Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKind {
    /// Клиентская сессия.
    Session,
    /// Клиентский запрос.
    Request,
    /// Запрос к бэкенду.
    BeReq,
    /// Запись без группировки (`-g raw`).
    Raw,
}

impl EntryKind {
    /// Все известные типы записей.
    pub const ALL: [Self; 4] = [Self::Session, Self::Request, Self::BeReq, Self::Raw];

    /// Возвращает строковое представление типа, как в заголовке записи.
    ///
    /// # Пример
    /// ```
    /// use vslparser::EntryKind;
    /// assert_eq!(EntryKind::BeReq.as_str(), "BeReq");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "Session",
            Self::Request => "Request",
            Self::BeReq => "BeReq",
            Self::Raw => "Raw",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseError::UnknownKind(s.to_string()))
    }
}

/// Одна разобранная запись `varnishlog`.
///
/// Создаётся заново на каждый успешный вызов [`parse`](crate::parse) и
/// после создания не изменяется.
///
/// # Пример
///
/// ```
/// use vslparser::{Entry, EntryKind, Fields};
///
/// let fields: Fields = [("ReqMethod", "GET"), ("ReqHeader", "Host: example.com")]
///     .into_iter()
///     .collect();
/// let entry = Entry::new(EntryKind::Request, 32770, fields);
///
/// assert_eq!(entry.first("ReqMethod"), Some("GET"));
/// assert_eq!(entry.to_string(), "* << Request >> 32770\n\
///                                - ReqHeader Host: example.com\n\
///                                - ReqMethod GET\n\
///                                - End");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    kind: EntryKind,
    vxid: Vxid,
    fields: Fields,
}

impl Entry {
    /// Создаёт запись из готовых частей.
    #[must_use]
    pub fn new(kind: EntryKind, vxid: Vxid, fields: Fields) -> Self {
        Self { kind, vxid, fields }
    }

    /// Тип транзакции.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Идентификатор транзакции.
    #[must_use]
    pub fn vxid(&self) -> Vxid {
        self.vxid
    }

    /// Теги записи со всеми значениями.
    #[must_use]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Забирает теги записи.
    #[must_use]
    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Все значения тега в порядке появления.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[String]> {
        self.fields.get(tag)
    }

    /// Первое значение тега.
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&str> {
        self.fields.first(tag)
    }
}

/// Выводит запись в текстовом формате `varnishlog`.
///
/// Теги идут в лексикографическом порядке, значения одного тега — в порядке
/// появления. Результат снова разбирается в равную запись.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "* << {} >> {}", self.kind, self.vxid)?;
        for (tag, value) in self.fields.iter() {
            writeln!(f, "- {tag} {value}")?;
        }
        f.write_str("- End")
    }
}
