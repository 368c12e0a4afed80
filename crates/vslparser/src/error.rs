//! Модуль ошибок парсинга записей.

use thiserror::Error;

use crate::entry::{EntryKind, Vxid};

/// Главная ошибка парсинга записей `varnishlog`.
///
/// [`ParseError::EndOfInput`] не является дефектом: это сигнал чистого
/// окончания потока, по которому вызывающий код завершает цикл чтения.
/// Все остальные варианты фатальны для текущей записи.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Поток исчерпан, незавершённой записи нет.
    #[error("end of input")]
    EndOfInput,

    /// Строка заголовка не соответствует грамматике `* << KIND >> VXID`.
    #[error("malformed header '{line}': {reason}")]
    MalformedHeader {
        /// Исходный текст строки.
        line: String,
        /// Описание нарушения.
        reason: String,
    },

    /// Строка тела записи нарушает грамматику маркера или тега.
    #[error("malformed body line '{line}': {reason}")]
    MalformedBody {
        /// Исходный текст строки.
        line: String,
        /// Описание нарушения.
        reason: String,
    },

    /// Поток закончился до строки `- End`.
    #[error("truncated entry {kind} {vxid}: input ended before '- End'")]
    TruncatedEntry {
        /// Тип незавершённой записи.
        kind: EntryKind,
        /// Идентификатор незавершённой записи.
        vxid: Vxid,
    },

    /// Неизвестный тип записи.
    #[error("unknown entry kind '{0}'")]
    UnknownKind(String),

    /// Ошибка чтения из источника строк.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Возвращает `true`, если поток закончился между записями.
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }

    pub(crate) fn malformed_header(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHeader { line: line.to_string(), reason: reason.into() }
    }

    pub(crate) fn malformed_body(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedBody { line: line.to_string(), reason: reason.into() }
    }
}

/// Удобный alias для Result с ParseError.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_of_input_is_distinguishable() {
        assert!(ParseError::EndOfInput.is_end_of_input());
        assert!(!ParseError::malformed_header("- ", "expected '*'").is_end_of_input());
        assert!(
            !ParseError::TruncatedEntry { kind: EntryKind::Request, vxid: 1 }.is_end_of_input()
        );
    }

    #[test]
    fn messages_carry_offending_line() {
        let err = ParseError::malformed_body(" - Foo Bar", "missing '-' marker");
        assert_eq!(err.to_string(), "malformed body line ' - Foo Bar': missing '-' marker");

        let err = ParseError::TruncatedEntry { kind: EntryKind::BeReq, vxid: 7 };
        assert_eq!(err.to_string(), "truncated entry BeReq 7: input ended before '- End'");
    }
}
